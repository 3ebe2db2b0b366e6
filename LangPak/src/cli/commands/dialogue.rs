//! CLI commands for dialogue and database lookups

use std::path::Path;

use rvtext::formats::DatabasePath;

use super::{language_label, load_state};

/// Print a dialogue block with its tags.
pub fn get(root: &Path, id: &str, language: Option<&str>) -> anyhow::Result<()> {
    let state = load_state(root, language)?;
    let Some(entry) = state.resolve_dialogue(id) else {
        println!("No dialogue '{id}' in {}", language_label(state.language()));
        return Ok(());
    };

    for (name, value) in &entry.tags {
        match value {
            Some(value) => println!("<<{name}: {value}>>"),
            None => println!("<<{name}>>"),
        }
    }
    println!("{}", entry.text);
    Ok(())
}

/// Print the override stored under a database path.
pub fn field(root: &Path, path: &str, language: Option<&str>) -> anyhow::Result<()> {
    let path: DatabasePath = path.parse()?;
    let state = load_state(root, language)?;

    match state.database().get(&path) {
        Some(value) => println!("{value}"),
        None => println!(
            "{path} is not overridden in {}; the game's own value applies",
            language_label(state.language())
        ),
    }
    Ok(())
}
