use serde::{Deserialize, Serialize};

use crate::{LocalizationError, TranslationStore};

/// A code which is looked up every time it's read, so it always shows the active language.
///
/// Nothing is checked when a handle is made, so handles can be created (or deserialized
/// as a plain string) before the table is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedHandle {
    code: String,
}

impl LocalizedHandle {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The text for this code in the store's active language.
    pub fn resolve<'s>(&self, store: &'s TranslationStore) -> Result<&'s str, LocalizationError> {
        store.localize(&self.code)
    }

    /// Like [resolve](Self::resolve), but falls back to the code itself. This is what UI should draw.
    pub fn resolve_or_code<'a>(&'a self, store: &'a TranslationStore) -> &'a str {
        store.localize_or_code(&self.code)
    }
}

impl From<&str> for LocalizedHandle {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LocalizedHandle {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiskStorage, LocalizationConfig, MemoryPreferences};

    #[test]
    fn unresolved_before_initialize() {
        let store = TranslationStore::new(
            LocalizationConfig::default(),
            MemoryPreferences::new(),
            DiskStorage,
        );
        let handle = LocalizedHandle::from("greeting");

        assert!(matches!(
            handle.resolve(&store),
            Err(LocalizationError::NotInitialized)
        ));
        assert_eq!(handle.resolve_or_code(&store), "greeting");
    }

    #[test]
    fn serializes_as_its_code() {
        let handle = LocalizedHandle::new("menu.start");
        assert_eq!(serde_json::to_string(&handle).unwrap(), r#""menu.start""#);

        let back: LocalizedHandle = serde_json::from_str(r#""farewell""#).unwrap();
        assert_eq!(back.code(), "farewell");
    }
}
