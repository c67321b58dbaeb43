use std::{error::Error, io, path::Path};

use tracing::{debug, error, info, warn};

use crate::{
    ColumnMap, FileStorage, Language, LocalizationConfig, LocalizationError, LookupError,
    PreferenceStore, ScaffoldOutcome, Seed, TranslationTable, LANGUAGE_PREF_KEY,
};

/// What a language change listener hands back. Errors are logged and don't stop other listeners.
pub type ListenerResult = Result<(), Box<dyn Error>>;

type Listener = Box<dyn FnMut(&TranslationStore) -> ListenerResult>;

/// Identifies a listener registered with [TranslationStore::subscribe].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Owns a translation table and the active language.
///
/// A store starts out uninitialized, so listeners can [subscribe](Self::subscribe) before
/// [initialize](Self::initialize) fires the first change notification. Everything else
/// returns [LocalizationError::NotInitialized] until then.
pub struct TranslationStore {
    config: LocalizationConfig,
    preferences: Box<dyn PreferenceStore>,
    files: Box<dyn FileStorage>,

    state: StoreState,

    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

enum StoreState {
    Uninitialized,
    Ready(Loaded),
}

struct Loaded {
    table: TranslationTable,
    columns: ColumnMap,
    language: Language,
}

impl TranslationStore {
    /// Creates an uninitialized store.
    pub fn new(
        config: LocalizationConfig,
        preferences: impl PreferenceStore + 'static,
        files: impl FileStorage + 'static,
    ) -> Self {
        Self {
            config,
            preferences: Box::new(preferences),
            files: Box::new(files),
            state: StoreState::Uninitialized,
            listeners: vec![],
            next_listener: 0,
        }
    }

    /// Creates an uninitialized store reading from disk and keeping preferences
    /// as JSON at `preferences_path`.
    pub fn with_disk(
        config: LocalizationConfig,
        preferences_path: impl Into<std::path::PathBuf>,
    ) -> Result<Self, LocalizationError> {
        let preferences = crate::JsonPreferences::open(preferences_path)?;

        Ok(Self::new(config, preferences, crate::DiskStorage))
    }

    /// Reads the translation table and restores the stored language, falling back
    /// to the configured default. This always persists the language and notifies
    /// listeners once, even if nothing changed.
    ///
    /// ## Errors
    /// - [LocalizationError::FileNotFound] if the table doesn't exist. See [ensure_file_exists](Self::ensure_file_exists).
    /// - [LocalizationError::Io] or [LocalizationError::Parse] if it can't be read.
    pub fn initialize(&mut self) -> Result<(), LocalizationError> {
        let table = self.read_table()?;
        let columns = ColumnMap::new(self.config.columns, table.language_names());
        let language = self.restore_language();

        info!(
            path = %self.config.path().display(),
            rows = table.len(),
            "loaded translation table"
        );

        self.state = StoreState::Ready(Loaded {
            table,
            columns,
            language,
        });

        self.set_language(language)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready(_))
    }

    pub fn config(&self) -> &LocalizationConfig {
        &self.config
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    /// The active language.
    pub fn language(&self) -> Result<Language, LocalizationError> {
        Ok(self.loaded()?.language)
    }

    /// The loaded table.
    pub fn table(&self) -> Result<&TranslationTable, LocalizationError> {
        Ok(&self.loaded()?.table)
    }

    /// Finds the text for `code` in the active language.
    pub fn localize(&self, code: &str) -> Result<&str, LocalizationError> {
        let language = self.language()?;
        self.localize_in(code, language)
    }

    /// Finds the text for `code` in the given language.
    ///
    /// ## Errors
    /// - [LookupError::UnknownCode] if no row has this code.
    /// - [LookupError::MissingTranslation] if the row has no column for this language.
    pub fn localize_in(&self, code: &str, language: Language) -> Result<&str, LocalizationError> {
        let loaded = self.loaded()?;

        let Some(row) = loaded.table.find_row(code) else {
            return Err(LookupError::UnknownCode(code.to_owned()).into());
        };

        loaded
            .columns
            .column(language)
            .and_then(|idx| row.translation(idx))
            .ok_or_else(|| {
                LookupError::MissingTranslation {
                    code: code.to_owned(),
                    language,
                }
                .into()
            })
    }

    /// Like [localize](Self::localize), but renders the code itself on failure.
    /// Failures are logged at debug level, since UI may call this every frame.
    pub fn localize_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        match self.localize(code) {
            Ok(text) => text,
            Err(e) => {
                debug!(code, error = %e, "rendering untranslated code");
                code
            }
        }
    }

    /// Switches the active language, persists it and notifies every listener in the
    /// order they subscribed. Calling this with the current language still persists and notifies.
    ///
    /// A failure to persist is logged, but the switch still happens.
    pub fn set_language(&mut self, language: Language) -> Result<(), LocalizationError> {
        let StoreState::Ready(loaded) = &mut self.state else {
            return Err(LocalizationError::NotInitialized);
        };
        loaded.language = language;

        self.save_language_preference(language);
        self.notify_listeners();

        info!(%language, "language was set");

        Ok(())
    }

    /// Like [set_language](Self::set_language), taking a raw ordinal such as one from a settings menu.
    pub fn set_language_ordinal(&mut self, ordinal: i32) -> Result<(), LocalizationError> {
        let language = Language::try_from(ordinal)?;
        self.set_language(language)
    }

    /// Registers a listener which runs after every language change, including the one
    /// in [initialize](Self::initialize). It receives the store, so it can re-resolve its text.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TranslationStore) -> ListenerResult + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;

        self.listeners.push((id, Box::new(listener)));

        id
    }

    /// Removes a listener. Returns `false` if it wasn't subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);

        self.listeners.len() != len
    }

    /// Writes `seed` to the configured path if nothing is there yet, then re-reads the
    /// table if the store is already initialized.
    ///
    /// Failures are logged rather than returned. Whatever table was loaded before stays loaded.
    pub fn ensure_file_exists(&mut self, seed: &Seed) -> ScaffoldOutcome {
        let path = self.config.path();

        if self.files.exists(&path) {
            return ScaffoldOutcome::AlreadyPresent;
        }

        info!(path = %path.display(), "translation file does not exist, creating it");

        if let Err(e) = self.create_file(&path, seed) {
            error!(path = %path.display(), error = %e, "could not create translation file");
            return ScaffoldOutcome::Failed;
        }

        info!(path = %path.display(), "translation file created");

        if self.is_ready() {
            if let Err(e) = self.reload() {
                error!(error = %e, "could not reload the created translation file");
            }
        }

        ScaffoldOutcome::Created
    }

    /// Re-reads the table from disk, keeping the active language. Listeners are not notified.
    pub fn reload(&mut self) -> Result<(), LocalizationError> {
        if !self.is_ready() {
            return Err(LocalizationError::NotInitialized);
        }

        let table = self.read_table()?;
        let columns = ColumnMap::new(self.config.columns, table.language_names());

        let StoreState::Ready(loaded) = &mut self.state else {
            return Err(LocalizationError::NotInitialized);
        };
        loaded.table = table;
        loaded.columns = columns;

        Ok(())
    }

    fn loaded(&self) -> Result<&Loaded, LocalizationError> {
        match &self.state {
            StoreState::Ready(loaded) => Ok(loaded),
            StoreState::Uninitialized => Err(LocalizationError::NotInitialized),
        }
    }

    fn read_table(&self) -> Result<TranslationTable, LocalizationError> {
        let path = self.config.path();

        if !self.files.exists(&path) {
            return Err(LocalizationError::FileNotFound(path));
        }

        let contents = match self.files.read_to_string(&path) {
            Ok(v) => v,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LocalizationError::FileNotFound(path));
            }
            Err(source) => return Err(LocalizationError::Io { path, source }),
        };

        TranslationTable::parse(&contents).map_err(|source| LocalizationError::Parse { path, source })
    }

    fn create_file(&self, path: &Path, seed: &Seed) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.files.create_dir_all(parent)?;
        }

        let contents = seed
            .table()
            .to_csv()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        self.files.write(path, &contents)
    }

    fn restore_language(&self) -> Language {
        let fallback = self.config.default_language;

        let Some(ordinal) = self.preferences.get_int(LANGUAGE_PREF_KEY) else {
            return fallback;
        };

        Language::try_from(ordinal).unwrap_or_else(|e| {
            warn!(error = %e, %fallback, "stored language preference is invalid");
            fallback
        })
    }

    fn save_language_preference(&mut self, language: Language) {
        self.preferences.set_int(LANGUAGE_PREF_KEY, language.into());

        if let Err(e) = self.preferences.persist() {
            error!(%language, error = %e, "could not persist language preference");
        }
    }

    fn notify_listeners(&mut self) {
        // listeners only get `&self`, so none can subscribe while we hold the list
        let mut listeners = std::mem::take(&mut self.listeners);

        for (id, listener) in listeners.iter_mut() {
            if let Err(e) = listener(&*self) {
                warn!(listener = id.0, error = %e, "language change listener failed");
            }
        }

        self.listeners = listeners;
    }
}

impl std::fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("TranslationStore");
        s.field("config", &self.config);

        match &self.state {
            StoreState::Uninitialized => s.field("state", &"Uninitialized"),
            StoreState::Ready(loaded) => s
                .field("language", &loaded.language)
                .field("rows", &loaded.table.len()),
        };

        s.field("listeners", &self.listeners.len()).finish_non_exhaustive()
    }
}
