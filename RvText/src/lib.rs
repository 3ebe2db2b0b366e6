//! # RvText
//!
//! Line-oriented text asset formats for translating RPG Maker games.
//!
//! ## Supported Formats
//!
//! - **Dialogues** - text blocks keyed by text id, with display tags
//! - **`DatabaseText`** - database field overrides keyed by database path
//! - **Compiled assets** - pre-parsed tables that skip text parsing
//!
//! ## Quick Start
//!
//! ```
//! use rvtext::formats::{parse_dialogues, parse_database, NoBaseline, ItemGroup};
//!
//! let dialogues = parse_dialogues("<<Greeting>>\n<<face: Actor1, 0>>\nHello!\n")?;
//! assert_eq!(dialogues.get_text("Greeting"), Some("Hello!"));
//!
//! let database = parse_database("<<actors:3:name>>\nBob\n", &NoBaseline)?;
//! assert_eq!(database.item_field(ItemGroup::Actors, 3, "name"), Some("Bob"));
//! # Ok::<(), rvtext::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use rvtext::prelude::*;
//! ```

pub mod assets;
pub mod compiled;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::assets::{AssetKind, compiled_file_name, discover_languages, text_file_name};
    pub use crate::compiled::{CompiledTable, read_compiled, write_compiled};
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        BaselineDatabase, DatabasePath, DatabaseTable, DialogueEntry, DialogueTable, IndexedSet,
        ItemGroup, Learning, MessageOptions, NoBaseline, ScrollOptions, parse_database,
        parse_dialogues, read_database, read_dialogues,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
