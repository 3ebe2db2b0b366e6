//! Error types for `RvText`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `RvText` operations.
///
/// Every database-text variant carries the 1-based line number of the block
/// header it originated from. Any of them aborts the table build; a partial
/// table is never returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A text or compiled asset required by the active configuration is missing.
    #[error("asset not found: {path}")]
    AssetNotFound {
        /// The expected path of the asset.
        path: PathBuf,
    },

    // ==================== Database Text Errors ====================
    /// The first token of a database path is neither a known group nor a module name.
    #[error("DatabaseText: unknown group id '{group}' (line {line})")]
    UnknownGroup {
        /// The unrecognized group token.
        group: String,
        /// Line of the offending block header.
        line: usize,
    },

    /// The database path does not carry enough `:`-separated arguments for its group.
    #[error("DatabaseText: group id '{group}' needs more arguments (line {line})")]
    MissingArgument {
        /// The group that is missing arguments.
        group: String,
        /// Line of the offending block header.
        line: usize,
    },

    /// A `types`/`terms` path names a subgroup that does not exist.
    #[error("DatabaseText: unknown {group} variable id '{variable}' (line {line})")]
    UnknownVariable {
        /// `types` or `terms`.
        group: String,
        /// The unrecognized subgroup token.
        variable: String,
        /// Line of the offending block header.
        line: usize,
    },

    /// A numeric id or index token could not be parsed.
    ///
    /// This check goes beyond the group, argument and variable checks of
    /// path resolution: a path of the right shape still fails here when an
    /// id, slot or index is not a non-negative integer.
    #[error("DatabaseText: '{value}' is not a valid numeric id (line {line})")]
    InvalidIndex {
        /// The token that should have been a number.
        value: String,
        /// Line of the offending block header.
        line: usize,
    },

    /// A `classes:<id>:learnings:<slot>` entry names a class the baseline database does not have.
    #[error("DatabaseText: no baseline learnings for class {class_id} (line {line})")]
    MissingClassBaseline {
        /// The class id.
        class_id: u32,
        /// Line of the offending block header.
        line: usize,
    },

    /// A learning slot index is past the end of the class's baseline learnings.
    #[error("DatabaseText: class {class_id} has no learning slot {slot} (line {line})")]
    LearningSlotOutOfRange {
        /// The class id.
        class_id: u32,
        /// The requested slot index.
        slot: usize,
        /// Line of the offending block header.
        line: usize,
    },

    // ==================== Dialogue Text Errors ====================
    /// A display tag appeared after the body text of a dialogue block had started.
    #[error("Dialogues: tag '{tag}' must directly follow the text id (line {line})")]
    TagAfterText {
        /// The tag name.
        tag: String,
        /// Line of the misplaced tag.
        line: usize,
    },

    // ==================== Compiled Asset Errors ====================
    /// The data is not a compiled asset (missing RVTC magic).
    #[error("invalid compiled asset magic: expected RVTC, found {0:?}")]
    InvalidCompiledMagic([u8; 4]),

    /// The compiled asset was written by an unknown format version.
    #[error("unsupported compiled asset version: {version}")]
    UnsupportedCompiledVersion {
        /// The version byte found in the header.
        version: u8,
    },

    /// A compiled asset holds a different kind of table than requested.
    #[error("compiled asset holds {found}, expected {expected}")]
    AssetKindMismatch {
        /// The kind that was requested.
        expected: &'static str,
        /// The kind stored in the header.
        found: String,
    },

    /// JSON serialization error inside a compiled asset.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `RvText` operations.
pub type Result<T> = std::result::Result<T, Error>;
