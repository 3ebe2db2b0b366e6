//! Command execution implementations

use std::path::Path;

use super::Commands;
use super::definitions::{DialogueCommands, LanguageCommands};
use super::{check, compile, decompile, dialogue, extract, language};

impl Commands {
    /// Execute the selected command against a game root.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, root: &Path) -> anyhow::Result<()> {
        match self {
            Commands::Check {
                path,
                kind,
                baseline,
            } => check::execute(path, kind.map(|k| k.0), baseline.as_deref()),
            Commands::Dialogue { command } => command.execute(root),
            Commands::Field { path, language } => dialogue::field(root, path, language.as_deref()),
            Commands::Language { command } => command.execute(root),
            Commands::Compile { quiet } => compile::execute(root, *quiet),
            Commands::Decompile { source, output } => decompile::execute(source, output.as_deref()),
            Commands::Extract {
                content,
                output,
                converted,
                quiet,
            } => extract::execute(
                root,
                content,
                output.as_deref(),
                converted.as_deref(),
                *quiet,
            ),
        }
    }
}

impl DialogueCommands {
    /// # Errors
    /// Returns an error if the tables cannot be loaded.
    pub fn execute(&self, root: &Path) -> anyhow::Result<()> {
        match self {
            DialogueCommands::Get { id, language } => dialogue::get(root, id, language.as_deref()),
        }
    }
}

impl LanguageCommands {
    /// # Errors
    /// Returns an error if the settings, selection or tables cannot be read.
    pub fn execute(&self, root: &Path) -> anyhow::Result<()> {
        match self {
            LanguageCommands::Get => language::get(root),
            LanguageCommands::Set { language } => language::set(root, language),
            LanguageCommands::List => language::list(root),
        }
    }
}
