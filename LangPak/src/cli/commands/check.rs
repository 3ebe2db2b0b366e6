//! CLI command for checking text assets

use std::path::Path;

use anyhow::Context;
use rvtext::assets::AssetKind;
use rvtext::formats::{NoBaseline, parse_database, parse_dialogues, read_text_asset};

use crate::baseline::DatabaseSnapshot;

/// Parse a text asset and report its entry count or the first error.
pub fn execute(path: &Path, kind: Option<AssetKind>, baseline: Option<&Path>) -> anyhow::Result<()> {
    let kind = match kind {
        Some(kind) => kind,
        None => detect_kind(path)?,
    };
    let source = read_text_asset(path)?;

    let count = match kind {
        AssetKind::Dialogues => parse_dialogues(&source)
            .with_context(|| format!("Invalid dialogue file: {}", path.display()))?
            .len(),
        AssetKind::DatabaseText => {
            let snapshot = baseline.map(DatabaseSnapshot::load).transpose()?;
            let table = match &snapshot {
                Some(snapshot) => parse_database(&source, snapshot),
                None => parse_database(&source, &NoBaseline),
            };
            table
                .with_context(|| format!("Invalid database file: {}", path.display()))?
                .len()
        }
    };

    println!("✓ {}: {count} {kind} entries", path.display());
    Ok(())
}

/// Asset kind from a `Dialogues...` or `DatabaseText...` file name.
fn detect_kind(path: &Path) -> anyhow::Result<AssetKind> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    AssetKind::ALL
        .into_iter()
        .find(|kind| name.starts_with(kind.prefix()))
        .with_context(|| format!("Cannot tell the asset kind of {}; pass --kind", path.display()))
}
