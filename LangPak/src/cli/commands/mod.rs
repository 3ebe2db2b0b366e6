use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use rvtext::assets::AssetKind;

use crate::error::Error;
use crate::state::{LanguageState, LanguageSystem};

pub mod check;
pub mod compile;
pub mod decompile;
pub mod definitions;
pub mod dialogue;
mod execute;
pub mod extract;
pub mod language;

use definitions::{DialogueCommands, LanguageCommands};

/// Asset kind given on the command line
#[derive(Debug, Clone, Copy)]
pub struct KindArg(pub AssetKind);

impl FromStr for KindArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "dialogue" | "dialogues" | "d" => Ok(KindArg(AssetKind::Dialogues)),
            "database" | "databasetext" | "db" => Ok(KindArg(AssetKind::DatabaseText)),
            _ => Err(format!(
                "Invalid kind '{s}'. Valid values: dialogue/dialogues/d, database/databasetext/db"
            )),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a dialogue or database text file and report the first error
    Check {
        /// Text asset to check
        path: PathBuf,

        /// Asset kind (detected from the file name if not specified)
        #[arg(short, long)]
        kind: Option<KindArg>,

        /// Database snapshot JSON, needed for class learning overrides
        #[arg(long)]
        baseline: Option<PathBuf>,
    },

    /// Dialogue lookups
    Dialogue {
        #[command(subcommand)]
        command: DialogueCommands,
    },

    /// Resolve a database path (e.g. "actors:3:name") for a language
    Field {
        /// Database path
        path: String,

        /// Language to read (the active language if not specified)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Show, switch or list languages
    Language {
        #[command(subcommand)]
        command: LanguageCommands,
    },

    /// Compile the text assets of every configured language
    Compile {
        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert a compiled asset back to text
    Decompile {
        /// Compiled asset (.rvdata2)
        source: PathBuf,

        /// Output text file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract game text from a content dump into text assets
    Extract {
        /// Content dump (JSON)
        content: PathBuf,

        /// Output directory (the configured extracted_dir if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to save the converted content (<output>/Content.json by default)
        #[arg(long)]
        converted: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Tables of `language`, or of the persisted language when `None`.
///
/// An explicit language is built without being persisted.
pub(crate) fn load_state(root: &Path, language: Option<&str>) -> anyhow::Result<Arc<LanguageState>> {
    let mut system = LanguageSystem::open(root)?;
    match language {
        Some(language) => {
            if !system.settings().has_language(language) {
                return Err(Error::UnknownLanguage(language.to_string()).into());
            }
            let use_compiled = system.settings().assets.enable_encryption;
            Ok(Arc::new(system.build_state(Some(language), use_compiled)?))
        }
        None => {
            system.initialize()?;
            Ok(system.state())
        }
    }
}

/// Display name of a possibly unsuffixed language.
pub(crate) fn language_label(language: Option<&str>) -> &str {
    language.unwrap_or("(single language)")
}
