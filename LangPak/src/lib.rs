//! # LangPak
//!
//! Multi-language support for RPG Maker games: language switching, database
//! overrides and extraction of game text into translatable files.
//!
//! ## Features
//!
//! - **Language state** - load, switch and persist the active language
//! - **Override resolution** - dialogue blocks and database fields of the
//!   active language, falling through to the game's own values
//! - **Message codes** - `\dialogue[id]` and `\name[key]` substitution
//! - **Extraction** - turn event text and database values into text assets
//!
//! ## Quick Start
//!
//! ```no_run
//! use langpak::prelude::*;
//!
//! let mut system = LanguageSystem::open("MyGame")?;
//! system.initialize()?;
//!
//! let state = system.state();
//! let name = state.resolve_field(ItemGroup::Actors, 1, "name").or_native("Eric");
//! println!("{name}");
//!
//! system.set_language("Deutsch")?;
//! # Ok::<(), langpak::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `langpak` command-line binary

pub mod baseline;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod messages;
pub mod overrides;
pub mod state;
pub mod storage;

// Re-export the formats crate
pub use rvtext;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::baseline::{DatabaseItem, DatabaseSnapshot, ItemRef};
    pub use crate::config::{GameIni, LanguageSelection, Settings};
    pub use crate::constants::ConstantRegistry;
    pub use crate::error::{Error, Result};
    pub use crate::extract::{ExtractSummary, GameContent, extract_all};
    pub use crate::messages::{DialogueView, ScrollView};
    pub use crate::overrides::{ContentEntity, Localized, Resolution};
    pub use crate::state::{LanguageState, LanguageSystem};
    pub use crate::storage::{AssetStore, FsAssetStore};

    pub use rvtext::formats::{DatabasePath, DialogueEntry, IndexedSet, ItemGroup};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
