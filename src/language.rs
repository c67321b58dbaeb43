use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The languages a translation table can carry.
///
/// Declaration order matters: with [ColumnMapping::Ordinal], a language's
/// [ordinal](Language::ordinal) is the index of its text within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English
    Eng,
    /// German
    Deu,
    /// French
    Fra,
    /// Russian
    Rus,
    /// Spanish
    Spa,
    /// Ukrainian
    Ukr,
    /// Hindi
    Hin,
}

impl Language {
    /// Every language, in declaration order.
    pub const ALL: [Language; 7] = [
        Language::Eng,
        Language::Deu,
        Language::Fra,
        Language::Rus,
        Language::Spa,
        Language::Ukr,
        Language::Hin,
    ];

    /// The zero-based position of this language in [Language::ALL].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// The short name used in the header row of a table, like `Eng`.
    pub fn short_name(self) -> &'static str {
        match self {
            Language::Eng => "Eng",
            Language::Deu => "Deu",
            Language::Fra => "Fra",
            Language::Rus => "Rus",
            Language::Spa => "Spa",
            Language::Ukr => "Ukr",
            Language::Hin => "Hin",
        }
    }

    /// The English name of the language, for menus.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Eng => "English",
            Language::Deu => "German",
            Language::Fra => "French",
            Language::Rus => "Russian",
            Language::Spa => "Spanish",
            Language::Ukr => "Ukrainian",
            Language::Hin => "Hindi",
        }
    }

    /// Finds a language by its header name. Matching ignores ASCII case and surrounding whitespace.
    pub fn from_short_name(name: &str) -> Option<Language> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.short_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.short_name())
    }
}

impl TryFrom<i32> for Language {
    type Error = InvalidLanguage;

    fn try_from(ordinal: i32) -> Result<Self, Self::Error> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(InvalidLanguage(ordinal))
    }
}

impl From<Language> for i32 {
    fn from(language: Language) -> Self {
        language as i32
    }
}

/// An ordinal which doesn't name any [Language], usually read back from a stale preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("language ordinal {0} does not name a declared language")]
pub struct InvalidLanguage(pub i32);

/// How languages are matched to the columns of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// A language's text lives at its ordinal, whatever the header says.
    #[default]
    Ordinal,
    /// A language's text lives under the header column carrying its short name.
    Header,
}

/// An explicit `language -> translation index` table.
///
/// Indices are into [TranslationRow::translations](crate::TranslationRow::translations),
/// so the code column is already skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap(HashMap<Language, usize>);

impl ColumnMap {
    /// Maps every language to its ordinal.
    pub fn by_ordinal() -> Self {
        Self(Language::ALL.into_iter().map(|l| (l, l.ordinal())).collect())
    }

    /// Maps each language to the column whose header names it. Languages which
    /// the header doesn't mention are left unmapped, and unknown header names are ignored.
    /// If a language is named twice, the first column wins.
    pub fn from_header<S: AsRef<str>>(language_names: &[S]) -> Self {
        let mut map = HashMap::new();

        for (idx, name) in language_names.iter().enumerate() {
            if let Some(language) = Language::from_short_name(name.as_ref()) {
                map.entry(language).or_insert(idx);
            }
        }

        Self(map)
    }

    /// Builds the map the given mapping asks for.
    pub fn new<S: AsRef<str>>(mapping: ColumnMapping, language_names: &[S]) -> Self {
        match mapping {
            ColumnMapping::Ordinal => Self::by_ordinal(),
            ColumnMapping::Header => Self::from_header(language_names),
        }
    }

    /// The translation index for a language, if it has one.
    pub fn column(&self, language: Language) -> Option<usize> {
        self.0.get(&language).copied()
    }
}
