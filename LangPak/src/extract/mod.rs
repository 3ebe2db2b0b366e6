//! Extraction of game text into unsuffixed text assets
//!
//! Reads a [`GameContent`] snapshot, writes `Dialogues.<ext>` and
//! `DatabaseText.<ext>`, and rewrites the snapshot's event commands so
//! they reference the extracted entries. Translators copy the two files
//! to `Dialogues<Language>.<ext>` and so on.

mod content;
mod database;
mod events;

pub use content::{CommonEvent, EventCommand, EventPage, GameContent, GameMap, MapEvent, codes};
pub use events::{COMMON_EVENT_PREFIX, map_prefix, name_key, text_id};

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rvtext::assets::{AssetKind, text_file_name};
use rvtext::formats::{DatabaseWriter, DialogueWriter};

use crate::error::Result;

/// What one extraction run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub maps: usize,
    pub common_events: usize,
    /// Dialogue blocks (messages, scrolling texts, choices)
    pub dialogues: usize,
    /// `names:` aliases from name change commands
    pub names: usize,
    /// Database blocks, aliases excluded
    pub database_entries: usize,
    pub dialogue_path: PathBuf,
    pub database_path: PathBuf,
}

/// Extract all text of `content` into `out_dir`.
///
/// Existing asset files are replaced. `content` is converted in place; save
/// it to keep the converted commands.
///
/// # Errors
/// Returns an error if the directory or files cannot be written.
pub fn extract_all(content: &mut GameContent, out_dir: &Path, extension: &str) -> Result<ExtractSummary> {
    fs::create_dir_all(out_dir)?;

    let dialogue_path = out_dir.join(text_file_name(AssetKind::Dialogues, None, extension));
    let database_path = out_dir.join(text_file_name(AssetKind::DatabaseText, None, extension));

    let mut dialogue_out = DialogueWriter::new(BufWriter::new(File::create(&dialogue_path)?));
    let mut database_out = DatabaseWriter::new(BufWriter::new(File::create(&database_path)?));

    let mut summary = ExtractSummary::default();
    events::extract_events(content, &mut dialogue_out, &mut database_out, &mut summary)?;
    summary.database_entries += database::extract_database(&content.database, &mut database_out)?;

    dialogue_out.flush()?;
    database_out.flush()?;

    tracing::info!(
        "Extracted {} dialogues and {} database entries into {}",
        summary.dialogues,
        summary.database_entries + summary.names,
        out_dir.display()
    );

    summary.dialogue_path = dialogue_path;
    summary.database_path = database_path;
    Ok(summary)
}
