/// One line of a translation table: a code and its text in every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    /// The lookup key, like `greeting`.
    pub code: String,
    /// The text for each language column, in file order. The code column is not included.
    pub translations: Vec<String>,
}

impl TranslationRow {
    pub fn new(code: impl Into<String>, translations: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            code: code.into(),
            translations: translations.into_iter().map(Into::into).collect(),
        }
    }

    /// The text at the given translation index, if the row is long enough.
    pub fn translation(&self, idx: usize) -> Option<&str> {
        self.translations.get(idx).map(String::as_str)
    }
}

/// The parsed contents of a translation file.
///
/// ```text
/// code,Eng,Deu
/// greeting,Hello,Hallo
/// farewell,Goodbye,Auf Wiedersehen
/// ```
///
/// The first line is the header. Every other line is split on `,` with no quoting
/// or escaping, so a translation can never contain a comma. Rows may be of any width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    language_names: Vec<String>,
    rows: Vec<TranslationRow>,
}

impl TranslationTable {
    /// Builds a table directly, such as for seeding a new file.
    pub fn from_rows(language_names: Vec<String>, rows: Vec<TranslationRow>) -> Self {
        Self {
            language_names,
            rows,
        }
    }

    /// Parses the contents of a translation file.
    pub fn parse(csv_str: &str) -> Result<Self, TableParseErr> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(csv_str.as_bytes());

        let mut records = reader.records();

        // the header only documents the columns, so we just keep the names around
        let Some(header) = records.next() else {
            return Err(TableParseErr::HeaderLineMissing);
        };
        let language_names = header?.iter().skip(1).map(str::to_owned).collect();

        let mut rows = vec![];
        for record in records {
            let record = record?;
            let mut fields = record.iter();

            // csv never hands back an empty record, but we'd rather not trust that.
            let Some(code) = fields.next() else { continue };

            rows.push(TranslationRow::new(code, fields));
        }

        Ok(Self {
            language_names,
            rows,
        })
    }

    /// The language names in the header, without the leading `code` column.
    pub fn language_names(&self) -> &[String] {
        &self.language_names
    }

    /// Every row, in file order.
    pub fn rows(&self) -> &[TranslationRow] {
        &self.rows
    }

    /// Finds the first row with the given code.
    pub fn find_row(&self, code: &str) -> Option<&TranslationRow> {
        self.rows.iter().find(|row| row.code == code)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table back out in the same format [parse](Self::parse) reads.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(vec![]);

        writer.write_record(
            std::iter::once(HEADER_CODE_COLUMN).chain(self.language_names.iter().map(String::as_str)),
        )?;
        for row in &self.rows {
            writer.write_record(
                std::iter::once(row.code.as_str()).chain(row.translations.iter().map(String::as_str)),
            )?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// The name of the first header column.
pub const HEADER_CODE_COLUMN: &str = "code";

/// An error associated with parsing a translation file.
#[derive(Debug, thiserror::Error)]
pub enum TableParseErr {
    #[error("header line (`code,<language>,...`) is missing; the file is empty")]
    HeaderLineMissing,
    #[error("could not read translation record: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = include_str!("../test_files/localization.csv");

    #[test]
    fn basic() {
        let table = TranslationTable::parse(INPUT).unwrap();
        assert_eq!(table.language_names(), ["Eng", "Deu", "Fra"]);
        // the blank line is skipped
        assert_eq!(table.len(), 6);

        let farewell = table.find_row("farewell").unwrap();
        assert_eq!(farewell.translations, ["Goodbye", "Auf Wiedersehen", "Au revoir"]);
        assert_eq!(farewell.translation(1), Some("Auf Wiedersehen"));
        assert_eq!(farewell.translation(3), None);
    }

    #[test]
    fn first_match_wins() {
        let table = TranslationTable::parse(INPUT).unwrap();
        let greeting = table.find_row("greeting").unwrap();
        assert_eq!(greeting.translation(0), Some("Hello"));
        assert_eq!(table.rows().iter().filter(|r| r.code == "greeting").count(), 2);
    }

    #[test]
    fn rows_keep_their_width() {
        let table = TranslationTable::parse(INPUT).unwrap();
        let quit = table.find_row("menu.quit").unwrap();
        assert_eq!(quit.translations.len(), 2);
        assert_eq!(quit.translation(2), None);
    }

    #[test]
    fn no_quoting() {
        let table = TranslationTable::parse(INPUT).unwrap();
        let smalltalk = table.find_row("smalltalk").unwrap();
        assert_eq!(smalltalk.translation(0), Some("\"Nice weather\""));
        assert_eq!(smalltalk.translation(1), Some("Schönes Wetter"));

        let start = table.find_row("menu.start").unwrap();
        assert_eq!(start.translation(1), Some("Los geht's"));
    }

    #[test]
    fn header_only() {
        let table = TranslationTable::parse("code,Eng,Deu\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.language_names().len(), 2);
        assert!(table.find_row("code").is_none());
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            TranslationTable::parse(""),
            Err(TableParseErr::HeaderLineMissing)
        ));
    }

    #[test]
    fn written_tables_read_back() {
        let table = TranslationTable::from_rows(
            vec!["Eng".into(), "Deu".into()],
            vec![
                TranslationRow::new("greeting", ["Hello", "Hallo"]),
                TranslationRow::new("farewell", ["Goodbye", "Auf Wiedersehen"]),
            ],
        );

        let csv = table.to_csv().unwrap();
        assert_eq!(
            csv,
            "code,Eng,Deu\ngreeting,Hello,Hallo\nfarewell,Goodbye,Auf Wiedersehen\n"
        );
        assert_eq!(TranslationTable::parse(&csv).unwrap(), table);
    }
}
