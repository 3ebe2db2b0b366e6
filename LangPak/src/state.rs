//! Active language and its loaded tables
//!
//! [`LanguageSystem`] owns the settings, the asset store and the persisted
//! selection. Every load or switch builds a complete new [`LanguageState`]
//! and only then replaces the previous one, so a reader holding a state
//! snapshot never sees tables of two languages at once. A failed build
//! leaves the previous state in place.

use std::path::Path;
use std::sync::Arc;

use rvtext::assets::AssetKind;
use rvtext::formats::{
    BaselineDatabase, DatabaseTable, DialogueTable, NoBaseline, parse_database, parse_dialogues,
};

use crate::baseline::DatabaseSnapshot;
use crate::config::{GameIni, LanguageSelection, Settings};
use crate::constants::ConstantRegistry;
use crate::error::{Error, Result};
use crate::storage::{AssetStore, FsAssetStore};

/// The tables of one language. Immutable once built.
///
/// A disabled asset kind is an empty table, so every lookup into it falls
/// through to the native value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageState {
    language: Option<String>,
    dialogues: DialogueTable,
    database: DatabaseTable,
}

impl LanguageState {
    pub fn new(language: Option<String>, dialogues: DialogueTable, database: DatabaseTable) -> Self {
        Self {
            language,
            dialogues,
            database,
        }
    }

    /// `None` in single-language mode.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn dialogues(&self) -> &DialogueTable {
        &self.dialogues
    }

    #[must_use]
    pub fn database(&self) -> &DatabaseTable {
        &self.database
    }
}

/// Language switching and table loading.
pub struct LanguageSystem<S: AssetStore = FsAssetStore, L: LanguageSelection = GameIni> {
    settings: Settings,
    store: S,
    selection: L,
    baseline: Box<dyn BaselineDatabase>,
    constants: ConstantRegistry,
    state: Arc<LanguageState>,
}

impl LanguageSystem<FsAssetStore, GameIni> {
    /// Set up the system for a game root: `langpak.toml`, `Game.ini`, text
    /// assets in the root and compiled assets in the data directory.
    ///
    /// Nothing is loaded until [`LanguageSystem::initialize`] is called.
    ///
    /// # Errors
    /// Returns an error if the settings or the configured baseline cannot
    /// be loaded.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let settings = Settings::load_from_dir(root)?;
        let store = FsAssetStore::from_settings(root, &settings);
        let baseline = settings
            .assets
            .baseline
            .as_ref()
            .map(|path| DatabaseSnapshot::load(root.join(path)))
            .transpose()?;

        let system = Self::new(settings, store, GameIni::in_dir(root));
        Ok(match baseline {
            Some(snapshot) => system.with_baseline(snapshot),
            None => system,
        })
    }
}

impl<S: AssetStore, L: LanguageSelection> LanguageSystem<S, L> {
    pub fn new(settings: Settings, store: S, selection: L) -> Self {
        let state = LanguageState {
            language: settings.default_language().map(str::to_string),
            ..LanguageState::default()
        };
        Self {
            settings,
            store,
            selection,
            baseline: Box::new(NoBaseline),
            constants: ConstantRegistry::new(),
            state: Arc::new(state),
        }
    }

    /// Use a baseline database for class learning overrides.
    #[must_use]
    pub fn with_baseline(mut self, baseline: impl BaselineDatabase + 'static) -> Self {
        self.baseline = Box::new(baseline);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registry of translatable module constants, applied after every load.
    pub fn constants_mut(&mut self) -> &mut ConstantRegistry {
        &mut self.constants
    }

    /// Snapshot of the current tables.
    #[must_use]
    pub fn state(&self) -> Arc<LanguageState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.state.language()
    }

    /// Load the persisted language (or the default) and its tables.
    ///
    /// # Errors
    /// Returns an error if the selection cannot be read or a required asset
    /// is missing or malformed.
    pub fn initialize(&mut self) -> Result<()> {
        let language = self.persisted_language()?;
        self.switch_to(language)
    }

    /// Persist `language`, then rebuild both tables for it.
    ///
    /// # Errors
    /// Returns [`Error::SingleLanguageMode`] if no languages are configured,
    /// [`Error::UnknownLanguage`] for a language that is not configured, or
    /// any persistence or load error. On a load error the previous tables
    /// stay active.
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        if self.settings.is_single_language() {
            return Err(Error::SingleLanguageMode);
        }
        if !self.settings.has_language(language) {
            return Err(Error::UnknownLanguage(language.to_string()));
        }
        self.selection.save(language)?;
        self.switch_to(Some(language.to_string()))
    }

    /// Rebuild the tables of the current language.
    ///
    /// # Errors
    /// Returns an error if loading fails; the previous tables stay active.
    pub fn reload(&mut self) -> Result<()> {
        let language = self.state.language.clone();
        self.switch_to(language)
    }

    /// Build the tables of a language without activating them.
    ///
    /// # Errors
    /// Returns an error if an enabled asset is missing or malformed.
    pub fn build_state(&self, language: Option<&str>, use_compiled: bool) -> Result<LanguageState> {
        let assets = &self.settings.assets;
        let dialogues = if assets.use_dialogue_files {
            self.load_dialogues(language, use_compiled)?
        } else {
            DialogueTable::new()
        };
        let database = if assets.use_database_files {
            self.load_database(language, use_compiled)?
        } else {
            DatabaseTable::new()
        };
        Ok(LanguageState::new(language.map(str::to_string), dialogues, database))
    }

    /// Parse the text assets of one language and store them compiled.
    ///
    /// Returns the number of compiled assets written.
    ///
    /// # Errors
    /// Returns an error if parsing or writing fails.
    pub fn compile_language(&self, language: Option<&str>) -> Result<usize> {
        let state = self.build_state(language, false)?;
        let assets = &self.settings.assets;
        let mut written = 0;
        if assets.use_dialogue_files {
            self.store.save_compiled(language, &state.dialogues)?;
            written += 1;
        }
        if assets.use_database_files {
            self.store.save_compiled(language, &state.database)?;
            written += 1;
        }
        Ok(written)
    }

    /// Compile every configured language (or the unsuffixed assets in
    /// single-language mode), regardless of `enable_encryption`.
    ///
    /// # Errors
    /// Stops at the first language that fails.
    pub fn compile_all(&self) -> Result<usize> {
        let mut written = 0;
        for language in self.settings.asset_languages() {
            written += self.compile_language(language)?;
        }
        tracing::info!("Compiled {written} language assets");
        Ok(written)
    }

    fn persisted_language(&self) -> Result<Option<String>> {
        if self.settings.is_single_language() {
            return Ok(None);
        }
        let default = self.settings.default_language().map(str::to_string);
        match self.selection.load()? {
            Some(saved) if self.settings.has_language(&saved) => Ok(Some(saved)),
            Some(saved) => {
                tracing::warn!("Saved language '{saved}' is not configured, using the default");
                Ok(default)
            }
            None => Ok(default),
        }
    }

    fn switch_to(&mut self, language: Option<String>) -> Result<()> {
        let use_compiled = self.settings.assets.enable_encryption;
        let state = self.build_state(language.as_deref(), use_compiled)?;

        tracing::info!(
            "Loaded language {}: {} dialogues, {} database overrides",
            language.as_deref().unwrap_or("(single)"),
            state.dialogues.len(),
            state.database.len()
        );

        self.state = Arc::new(state);
        if self.settings.assets.use_database_files {
            self.constants.apply(&self.state.database);
        }
        Ok(())
    }

    fn load_dialogues(&self, language: Option<&str>, use_compiled: bool) -> Result<DialogueTable> {
        if use_compiled {
            return self.store.load_compiled(language);
        }
        let source = self.store.load_text(AssetKind::Dialogues, language)?;
        Ok(parse_dialogues(&source)?)
    }

    fn load_database(&self, language: Option<&str>, use_compiled: bool) -> Result<DatabaseTable> {
        if use_compiled {
            return self.store.load_compiled(language);
        }
        let source = self.store.load_text(AssetKind::DatabaseText, language)?;
        Ok(parse_database(&source, self.baseline.as_ref())?)
    }
}
