use crate::{Language, TranslationRow, TranslationTable};

/// The contents written when a translation file has to be created from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub languages: Vec<Language>,
    pub rows: Vec<TranslationRow>,
}

impl Seed {
    pub fn new(languages: Vec<Language>, rows: Vec<TranslationRow>) -> Self {
        Self { languages, rows }
    }

    /// The table this seed describes, with its header built from the languages' short names.
    pub fn table(&self) -> TranslationTable {
        TranslationTable::from_rows(
            self.languages
                .iter()
                .map(|lang| lang.short_name().to_owned())
                .collect(),
            self.rows.clone(),
        )
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            languages: vec![Language::Eng, Language::Deu],
            rows: vec![
                TranslationRow::new("greeting", ["Hello", "Hallo"]),
                TranslationRow::new("farewell", ["Goodbye", "Auf Wiedersehen"]),
            ],
        }
    }
}

/// What [ensure_file_exists](crate::TranslationStore::ensure_file_exists) ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// The file was already there and was left alone.
    AlreadyPresent,
    /// The file was written from the seed.
    Created,
    /// Creating the file failed. The error has been logged.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed() {
        let csv = Seed::default().table().to_csv().unwrap();
        assert_eq!(
            csv,
            "code,Eng,Deu\ngreeting,Hello,Hallo\nfarewell,Goodbye,Auf Wiedersehen\n"
        );
    }
}
