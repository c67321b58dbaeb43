use std::collections::HashMap;

use tracing::warn;

/// The preference key under which the chosen language's ordinal is stored.
pub const LANGUAGE_PREF_KEY: &str = "UserLanguage";

/// A small integer key-value store which survives restarts, such as an engine's player prefs.
///
/// [set_int](Self::set_int) may only stage a value; it is durable once [persist](Self::persist) returns `Ok`.
pub trait PreferenceStore {
    fn get_int(&self, key: &str) -> Option<i32>;
    fn set_int(&mut self, key: &str, value: i32);
    fn persist(&mut self) -> Result<(), PreferenceError>;
}

/// A [PreferenceStore] which only lives in memory. It is a wrapper around a HashMap,
/// and counts how often it has been persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, i32>,
    persist_count: usize,
}

impl MemoryPreferences {
    /// Creates a new, empty MemoryPreferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience method to start from an already stored language ordinal.
    pub fn with_language_ordinal(ordinal: i32) -> Self {
        let mut output = Self::new();
        output.values.insert(LANGUAGE_PREF_KEY.to_owned(), ordinal);

        output
    }

    /// How many times `persist` has been called.
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_int(&self, key: &str) -> Option<i32> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_owned(), value);
    }

    fn persist(&mut self) -> Result<(), PreferenceError> {
        self.persist_count += 1;
        Ok(())
    }
}

impl std::ops::Deref for MemoryPreferences {
    type Target = HashMap<String, i32>;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

/// Lets a caller keep its own handle on the preferences it gives to a store.
impl<P: PreferenceStore + ?Sized> PreferenceStore for std::rc::Rc<std::cell::RefCell<P>> {
    fn get_int(&self, key: &str) -> Option<i32> {
        self.borrow().get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.borrow_mut().set_int(key, value)
    }

    fn persist(&mut self) -> Result<(), PreferenceError> {
        self.borrow_mut().persist()
    }
}

/// A [PreferenceStore] kept as a flat JSON object on disk.
///
/// ```text
/// {
///   "UserLanguage": 1
/// }
/// ```
///
/// Keys this store doesn't understand, such as ones holding floats or strings, are
/// kept as they are and written back on [persist](PreferenceStore::persist).
#[derive(Debug)]
pub struct JsonPreferences {
    path: std::path::PathBuf,
    values: serde_json::Map<String, serde_json::Value>,
}

impl JsonPreferences {
    /// Opens the preferences at `path`. A missing file is an empty store, and so is
    /// a file which isn't a JSON object; that one is logged and replaced on the next persist.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();

        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "preferences are unreadable, starting empty");
                    serde_json::Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => serde_json::Map::new(),
            Err(e) => return Err(PreferenceError::Io(e)),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PreferenceStore for JsonPreferences {
    /// `None` if the key is missing or its value isn't an integer that fits an `i32`.
    fn get_int(&self, key: &str) -> Option<i32> {
        self.values
            .get(key)
            .and_then(serde_json::Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_owned(), value.into());
    }

    fn persist(&mut self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, contents)?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("could not access preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get_int(LANGUAGE_PREF_KEY), None);

        prefs.set_int(LANGUAGE_PREF_KEY, 3);
        prefs.persist().unwrap();

        assert_eq!(prefs.get_int(LANGUAGE_PREF_KEY), Some(3));
        assert_eq!(prefs.persist_count(), 1);
        assert_eq!(prefs.len(), 1);
    }

    #[test]
    fn json_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = JsonPreferences::open(&path).unwrap();
        assert_eq!(prefs.get_int(LANGUAGE_PREF_KEY), None);
        prefs.set_int(LANGUAGE_PREF_KEY, 1);

        // nothing is written until persist
        assert!(!path.exists());
        prefs.persist().unwrap();

        let reopened = JsonPreferences::open(&path).unwrap();
        assert_eq!(reopened.get_int(LANGUAGE_PREF_KEY), Some(1));
    }

    #[test]
    fn json_garbage_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let mut prefs = JsonPreferences::open(&path).unwrap();
        assert_eq!(prefs.get_int(LANGUAGE_PREF_KEY), None);

        prefs.set_int(LANGUAGE_PREF_KEY, 2);
        prefs.persist().unwrap();
        assert_eq!(
            JsonPreferences::open(&path).unwrap().get_int(LANGUAGE_PREF_KEY),
            Some(2)
        );
    }

    #[test]
    fn json_ignores_values_it_cannot_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(
            &path,
            r#"{"UserLanguage": 4294967296, "volume": 0.5, "name": "ada", "fullscreen": 1}"#,
        )
        .unwrap();

        let mut prefs = JsonPreferences::open(&path).unwrap();
        assert_eq!(prefs.get_int(LANGUAGE_PREF_KEY), None);
        assert_eq!(prefs.get_int("volume"), None);
        assert_eq!(prefs.get_int("name"), None);
        assert_eq!(prefs.get_int("fullscreen"), Some(1));

        // other keys survive being written back
        prefs.set_int(LANGUAGE_PREF_KEY, 1);
        prefs.persist().unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["UserLanguage"], 1);
        assert_eq!(written["volume"], 0.5);
        assert_eq!(written["name"], "ada");
    }
}
