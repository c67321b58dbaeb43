#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::todo)]
#![deny(rustdoc::broken_intra_doc_links)]

mod config;
mod files;
mod handle;
mod language;
mod scaffold;
mod storage;
mod store;
mod table;

use std::path::PathBuf;

pub use config::{ConfigError, LocalizationConfig};
pub use files::{DiskStorage, FileStorage};
pub use handle::LocalizedHandle;
pub use language::{ColumnMap, ColumnMapping, InvalidLanguage, Language};
pub use scaffold::{ScaffoldOutcome, Seed};
pub use storage::{
    JsonPreferences, MemoryPreferences, PreferenceError, PreferenceStore, LANGUAGE_PREF_KEY,
};
pub use store::{ListenerId, ListenerResult, TranslationStore};
pub use table::{TableParseErr, TranslationRow, TranslationTable, HEADER_CODE_COLUMN};

#[derive(Debug, thiserror::Error)]
pub enum LocalizationError {
    #[error("translation store is not initialized. call `initialize`")]
    NotInitialized,

    #[error("translation file `{}` does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("could not read translation file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse translation file `{}`: {source}", .path.display())]
    Parse { path: PathBuf, source: TableParseErr },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    InvalidLanguage(#[from] InvalidLanguage),

    #[error(transparent)]
    Preferences(#[from] PreferenceError),
}

/// A code which can't be turned into text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no translation row has the code `{0}`")]
    UnknownCode(String),

    #[error("the row for `{code}` has no `{language}` translation")]
    MissingTranslation { code: String, language: Language },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            LocalizationError::from(LookupError::UnknownCode("title".into())).to_string(),
            "no translation row has the code `title`"
        );
        assert_eq!(
            LookupError::MissingTranslation {
                code: "title".into(),
                language: Language::Hin
            }
            .to_string(),
            "the row for `title` has no `Hin` translation"
        );
        assert_eq!(
            LocalizationError::FileNotFound(PathBuf::from("missing.csv")).to_string(),
            "translation file `missing.csv` does not exist"
        );
    }
}
