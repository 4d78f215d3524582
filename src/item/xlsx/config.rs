use crate::error::SheetError;

/// Sheet created by the path, stream and workbook constructors when no name
/// is given.
pub const DEFAULT_SHEET_NAME: &str = "Export";

const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Settings handed to the `csv` serializer that turns items into records.
///
/// The delimiter and quote only shape the intermediate CSV text: every field
/// still ends up in its own cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    pub delimiter: u8,
    pub quote: u8,
    /// Emit a header row built from the field names of the first serialized item.
    pub has_headers: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            has_headers: false,
        }
    }
}

impl CsvConfig {
    pub fn validate(&self) -> Result<(), SheetError> {
        for (name, byte) in [("delimiter", self.delimiter), ("quote", self.quote)] {
            if !byte.is_ascii() || byte == b'\n' || byte == b'\r' {
                return Err(SheetError::Configuration(format!(
                    "{name} must be an ASCII character other than CR or LF, got {byte:#04x}"
                )));
            }
        }
        if self.delimiter == self.quote {
            return Err(SheetError::Configuration(format!(
                "delimiter and quote must differ, both are '{}'",
                char::from(self.delimiter)
            )));
        }
        Ok(())
    }

    /// A serializer into memory. `has_headers` overrides the configured value
    /// so the header row can be limited to the first item.
    pub(crate) fn csv_writer(&self, has_headers: bool) -> csv::Writer<Vec<u8>> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(has_headers)
            .flexible(true)
            .from_writer(Vec::new())
    }

    pub(crate) fn csv_reader<'r>(&self, data: &'r [u8]) -> csv::Reader<&'r [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(data)
    }
}

/// Checks a worksheet name against the rules spreadsheet applications enforce.
pub fn validate_sheet_name(name: &str) -> Result<(), SheetError> {
    if name.is_empty() {
        return Err(SheetError::Configuration(
            "sheet name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(SheetError::Configuration(format!(
            "sheet name '{name}' is longer than {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
        return Err(SheetError::Configuration(format!(
            "sheet name '{name}' contains forbidden character '{c}'"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(SheetError::Configuration(format!(
            "sheet name '{name}' cannot start or end with an apostrophe"
        )));
    }
    Ok(())
}
