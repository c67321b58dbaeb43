use std::path::PathBuf;

use serde::Deserialize;

use crate::{ColumnMapping, Language};

/// Where the translation table lives and how to read it.
///
/// Every field is optional when loading from TOML:
///
/// ```toml
/// assets_dir = "assets"
/// file_name = "localization.csv"
/// default_language = "Eng"
/// columns = "ordinal"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalizationConfig {
    /// The directory the table is read from and scaffolded into.
    pub assets_dir: PathBuf,
    /// The table's file name inside `assets_dir`.
    pub file_name: String,
    /// Used when no valid language preference has been stored.
    pub default_language: Language,
    /// How languages find their column.
    pub columns: ColumnMapping,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            file_name: "localization.csv".to_owned(),
            default_language: Language::Eng,
            columns: ColumnMapping::Ordinal,
        }
    }
}

impl LocalizationConfig {
    /// A default config reading `file_name` out of `assets_dir`.
    pub fn new(assets_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    pub fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// The full path of the translation table.
    pub fn path(&self) -> PathBuf {
        self.assets_dir.join(&self.file_name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid localization config: {0}")]
    Toml(#[from] toml::de::Error),
}
