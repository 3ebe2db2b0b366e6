use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("RvText error: {0}")]
    RvText(#[from] rvtext::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Settings serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("No languages are configured (single-language mode)")]
    SingleLanguageMode,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
