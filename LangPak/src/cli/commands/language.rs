//! CLI commands for the active language

use std::path::Path;

use rvtext::assets::discover_languages;

use crate::config::{GameIni, LanguageSelection, Settings};
use crate::state::LanguageSystem;

/// Print the persisted language, or the default.
pub fn get(root: &Path) -> anyhow::Result<()> {
    let settings = Settings::load_from_dir(root)?;
    let Some(default) = settings.default_language() else {
        println!("Single-language mode");
        return Ok(());
    };

    match GameIni::in_dir(root).load()? {
        Some(saved) if settings.has_language(&saved) => println!("{saved}"),
        Some(saved) => println!("{default} (saved language '{saved}' is not configured)"),
        None => println!("{default} (default)"),
    }
    Ok(())
}

/// Switch language: persist it and load its tables.
pub fn set(root: &Path, language: &str) -> anyhow::Result<()> {
    let mut system = LanguageSystem::open(root)?;
    system.set_language(language)?;

    let state = system.state();
    println!(
        "✓ Switched to {language}: {} dialogues, {} database overrides",
        state.dialogues().len(),
        state.database().len()
    );
    Ok(())
}

/// List configured languages and the dialogue files present.
pub fn list(root: &Path) -> anyhow::Result<()> {
    let settings = Settings::load_from_dir(root)?;
    let found = discover_languages(root, &settings.assets.extension)?;

    if settings.is_single_language() {
        println!("Single-language mode");
    }
    for language in &settings.languages.available {
        let marker = if settings.default_language() == Some(language.as_str()) {
            "*"
        } else {
            " "
        };
        let status = if found.contains(language) {
            ""
        } else {
            " (no dialogue file)"
        };
        println!("{marker} {language}{status}");
    }

    let unconfigured: Vec<&String> = found
        .iter()
        .filter(|language| !settings.has_language(language))
        .collect();
    if !unconfigured.is_empty() {
        println!();
        println!("Dialogue files without a configured language:");
        for language in unconfigured {
            println!("  {language}");
        }
    }
    Ok(())
}
