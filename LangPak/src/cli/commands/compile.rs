//! CLI command for compiling language assets

use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use super::language_label;
use crate::cli::progress::{GEAR, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::state::LanguageSystem;

/// Compile the text assets of every configured language.
pub fn execute(root: &Path, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, "Reading settings...");
    }
    let system = LanguageSystem::open(root)?;
    let languages = system.settings().asset_languages();

    if !quiet {
        print_step(2, 2, GEAR, &format!("Compiling {} language(s)...", languages.len()));
    }
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        simple_bar(languages.len() as u64, "Compiling")
    };

    let mut written = 0;
    for language in &languages {
        pb.set_message(language_label(*language).to_string());
        written += system.compile_language(*language)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    let data_dir = root.join(&system.settings().assets.data_dir);
    println!("✓ Wrote {written} compiled assets to {}", data_dir.display());
    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}
