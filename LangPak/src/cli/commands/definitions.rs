//! Subcommand enum definitions for CLI

use clap::Subcommand;

/// Dialogue commands
#[derive(Subcommand)]
pub enum DialogueCommands {
    /// Print a dialogue block with its display tags
    Get {
        /// Text id
        id: String,

        /// Language to read (the active language if not specified)
        #[arg(short, long)]
        language: Option<String>,
    },
}

/// Language commands
#[derive(Subcommand)]
pub enum LanguageCommands {
    /// Print the active language
    Get,

    /// Switch to a language and persist the choice in Game.ini
    Set {
        /// Configured language name
        language: String,
    },

    /// List configured languages and the dialogue files found
    List,
}
