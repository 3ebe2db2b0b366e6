//! Project settings (`langpak.toml`) and the persisted language selection

pub mod game_ini;

pub use game_ini::{GameIni, LanguageSelection};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings file name in the game root.
pub const SETTINGS_FILE_NAME: &str = "langpak.toml";

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    rvtext::assets::DEFAULT_TEXT_EXTENSION.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("Data")
}

fn default_extracted_dir() -> PathBuf {
    PathBuf::from("Extracted")
}

/// The full settings file. Every field has a default, so a missing file
/// means a single-language project reading text assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub languages: LanguageSettings,
    #[serde(default)]
    pub assets: AssetSettings,
}

/// Available languages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    /// Empty means single-language mode with unsuffixed asset names.
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Asset loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSettings {
    #[serde(default = "default_true")]
    pub use_dialogue_files: bool,
    #[serde(default = "default_true")]
    pub use_database_files: bool,
    /// Load compiled assets instead of parsing text.
    #[serde(default)]
    pub enable_encryption: bool,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Directory of compiled assets, relative to the game root.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Output directory of `extract`, relative to the game root.
    #[serde(default = "default_extracted_dir")]
    pub extracted_dir: PathBuf,
    /// JSON database snapshot used for class learning overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<PathBuf>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            use_dialogue_files: true,
            use_database_files: true,
            enable_encryption: false,
            extension: default_extension(),
            data_dir: default_data_dir(),
            extracted_dir: default_extracted_dir(),
            baseline: None,
        }
    }
}

impl Settings {
    /// Load settings from a file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`Settings::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `langpak.toml` from a game root.
    ///
    /// # Errors
    /// See [`Settings::load`].
    pub fn load_from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::load(root.as_ref().join(SETTINGS_FILE_NAME))
    }

    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check the language list against the default language.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSettings`] if languages are configured without
    /// a default, or the default is not one of them.
    pub fn validate(&self) -> Result<()> {
        let languages = &self.languages;
        match &languages.default {
            Some(default) if !languages.available.contains(default) => Err(Error::InvalidSettings(
                format!("default language '{default}' is not in the available languages"),
            )),
            None if !languages.available.is_empty() => Err(Error::InvalidSettings(
                "available languages are configured without a default".to_string(),
            )),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn is_single_language(&self) -> bool {
        self.languages.available.is_empty()
    }

    #[must_use]
    pub fn default_language(&self) -> Option<&str> {
        self.languages.default.as_deref()
    }

    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.available.iter().any(|l| l == language)
    }

    /// Language suffixes to compile: every configured language, or the
    /// unsuffixed assets in single-language mode.
    #[must_use]
    pub fn asset_languages(&self) -> Vec<Option<&str>> {
        if self.is_single_language() {
            vec![None]
        } else {
            self.languages.available.iter().map(|l| Some(l.as_str())).collect()
        }
    }
}
