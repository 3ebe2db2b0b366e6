//! Where language assets are read from and compiled assets written to

use std::path::{Path, PathBuf};

use rvtext::assets::{AssetKind, compiled_file_name, text_file_name};
use rvtext::compiled::{self, CompiledTable};
use rvtext::formats::read_text_asset;

use crate::config::Settings;
use crate::error::Result;

/// Source of the text and compiled assets of each language.
pub trait AssetStore {
    /// Decoded content of a text asset.
    fn load_text(&self, kind: AssetKind, language: Option<&str>) -> Result<String>;

    /// A pre-parsed table.
    fn load_compiled<T: CompiledTable>(&self, language: Option<&str>) -> Result<T>;

    /// Store a pre-parsed table.
    fn save_compiled<T: CompiledTable>(&self, language: Option<&str>, table: &T) -> Result<()>;
}

/// Text assets in the game root, compiled assets in its data directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
    data_dir: PathBuf,
    extension: String,
}

impl FsAssetStore {
    pub fn new(
        root: impl Into<PathBuf>,
        data_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            data_dir: data_dir.into(),
            extension: extension.into(),
        }
    }

    /// Store for a game root laid out according to the settings.
    pub fn from_settings<P: AsRef<Path>>(root: P, settings: &Settings) -> Self {
        let root = root.as_ref();
        Self {
            root: root.to_path_buf(),
            data_dir: root.join(&settings.assets.data_dir),
            extension: settings.assets.extension.clone(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn text_path(&self, kind: AssetKind, language: Option<&str>) -> PathBuf {
        self.root.join(text_file_name(kind, language, &self.extension))
    }

    #[must_use]
    pub fn compiled_path(&self, kind: AssetKind, language: Option<&str>) -> PathBuf {
        self.data_dir.join(compiled_file_name(kind, language))
    }
}

impl AssetStore for FsAssetStore {
    fn load_text(&self, kind: AssetKind, language: Option<&str>) -> Result<String> {
        Ok(read_text_asset(self.text_path(kind, language))?)
    }

    fn load_compiled<T: CompiledTable>(&self, language: Option<&str>) -> Result<T> {
        Ok(compiled::read_compiled(self.compiled_path(T::KIND, language))?)
    }

    fn save_compiled<T: CompiledTable>(&self, language: Option<&str>, table: &T) -> Result<()> {
        Ok(compiled::write_compiled(self.compiled_path(T::KIND, language), table)?)
    }
}
