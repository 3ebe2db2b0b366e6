//! CLI command for extracting game text

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, LOOKING_GLASS, PACKAGE, print_done, print_step, simple_spinner};
use crate::config::Settings;
use crate::extract::{GameContent, extract_all};

/// Default file name of the converted content dump.
const CONVERTED_CONTENT_FILE: &str = "Content.json";

/// Extract a content dump into text assets and save the converted content.
pub fn execute(
    root: &Path,
    content_path: &Path,
    output: Option<&Path>,
    converted: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let settings = Settings::load_from_dir(root)?;
    let out_dir = output.map_or_else(|| root.join(&settings.assets.extracted_dir), Path::to_path_buf);

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, "Reading content...");
    }
    let mut content = GameContent::load(content_path)
        .with_context(|| format!("Failed to load content dump: {}", content_path.display()))?;

    if !quiet {
        print_step(2, 3, PACKAGE, "Extracting text...");
    }
    let spinner = (!quiet).then(|| simple_spinner("Writing text assets"));
    let summary = extract_all(&mut content, &out_dir, &settings.assets.extension)?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if !quiet {
        print_step(3, 3, DISK, "Saving converted content...");
    }
    let converted = converted.map_or_else(|| out_dir.join(CONVERTED_CONTENT_FILE), Path::to_path_buf);
    content.save(&converted)?;

    println!();
    println!("Extraction complete:");
    println!("  Maps: {}", summary.maps);
    println!("  Common events: {}", summary.common_events);
    println!("  Dialogues: {} -> {}", summary.dialogues, summary.dialogue_path.display());
    println!(
        "  Database entries: {} -> {}",
        summary.database_entries + summary.names,
        summary.database_path.display()
    );
    println!("  Converted content: {}", converted.display());

    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}
