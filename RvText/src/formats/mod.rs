//! Text asset formats
//!
//! `block` is the shared line tokenizer; `dialogue` and `database` give the
//! tokens their meaning.

pub mod block;
pub mod database;
pub mod dialogue;

pub use block::{RawLine, decode_text, read_text_asset};
pub use database::{
    BaselineDatabase, DatabasePath, DatabaseTable, DatabaseWriter, IndexedSet, ItemGroup, Learning,
    NoBaseline, PathError, parse_database, read_database,
};
pub use dialogue::{
    DialogueEntry, DialogueTable, DialogueWriter, MessageOptions, ScrollOptions, parse_dialogues,
    read_dialogues,
};
