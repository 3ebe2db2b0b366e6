//! CLI command for turning compiled assets back into text

use std::path::Path;

use anyhow::Context;
use rvtext::assets::AssetKind;
use rvtext::compiled::{decode, peek_kind};
use rvtext::formats::{DatabaseTable, DialogueTable};

/// Decompile a compiled asset to its text form.
pub fn execute(source: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let bytes = std::fs::read(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;

    let kind = peek_kind(&bytes)?;
    let text = match kind {
        AssetKind::Dialogues => decode::<DialogueTable>(&bytes)?.to_text(),
        AssetKind::DatabaseText => decode::<DatabaseTable>(&bytes)?.to_text(),
    };

    match output {
        Some(output) => {
            std::fs::write(output, text)?;
            println!("✓ Decompiled {kind} to {}", output.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
