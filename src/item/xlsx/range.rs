use std::fmt;

use crate::error::SheetError;

/// Number of rows in a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Number of columns in a worksheet.
pub const MAX_COLUMNS: u16 = 16_384;

/// A rectangular block of cells on a named worksheet.
///
/// Rows and columns are 1-based, the way they are shown to spreadsheet users.
/// The writer only uses the top-left corner, as the origin of every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    sheet: String,
    first_row: u32,
    first_column: u16,
    last_row: u32,
    last_column: u16,
}

impl CellRange {
    /// Creates a range from 1-based, inclusive corner coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::InvalidRange`] when a coordinate is zero, beyond
    /// the worksheet limits, or when a first coordinate exceeds its last one.
    pub fn new(
        sheet: &str,
        first_row: u32,
        first_column: u16,
        last_row: u32,
        last_column: u16,
    ) -> Result<Self, SheetError> {
        for (name, row) in [("first row", first_row), ("last row", last_row)] {
            if row == 0 || row > MAX_ROWS {
                return Err(SheetError::InvalidRange(format!(
                    "{name} {row} is outside 1..={MAX_ROWS}"
                )));
            }
        }
        for (name, column) in [("first column", first_column), ("last column", last_column)] {
            if column == 0 || column > MAX_COLUMNS {
                return Err(SheetError::InvalidRange(format!(
                    "{name} {column} is outside 1..={MAX_COLUMNS}"
                )));
            }
        }
        if first_row > last_row || first_column > last_column {
            return Err(SheetError::InvalidRange(format!(
                "({first_row}, {first_column}) is not the top-left corner of ({last_row}, {last_column})"
            )));
        }

        Ok(Self {
            sheet: sheet.to_string(),
            first_row,
            first_column,
            last_row,
            last_column,
        })
    }

    /// The range covering an entire worksheet, anchored at `A1`.
    pub fn whole_sheet(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            first_row: 1,
            first_column: 1,
            last_row: MAX_ROWS,
            last_column: MAX_COLUMNS,
        }
    }

    /// Parses a range in A1 notation such as `Data!B2:D10` or `'My data'!$C$3`.
    ///
    /// The sheet prefix is required. A single cell anchors a one-cell range.
    ///
    /// # Examples
    ///
    /// ```
    /// use csv_sheet_rs::item::xlsx::CellRange;
    ///
    /// let range = CellRange::parse("Report!B3:D10").unwrap();
    /// assert_eq!(range.sheet(), "Report");
    /// assert_eq!((range.first_row(), range.first_column()), (3, 2));
    /// assert_eq!((range.last_row(), range.last_column()), (10, 4));
    /// ```
    pub fn parse(notation: &str) -> Result<Self, SheetError> {
        let (sheet, cells) = notation.rsplit_once('!').ok_or_else(|| {
            SheetError::InvalidRange(format!("missing sheet name in '{notation}'"))
        })?;

        let sheet = match sheet.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            Some(quoted) => quoted.replace("''", "'"),
            None => sheet.to_string(),
        };
        if sheet.is_empty() {
            return Err(SheetError::InvalidRange(format!(
                "missing sheet name in '{notation}'"
            )));
        }

        let (first, last) = match cells.split_once(':') {
            Some((first, last)) => (parse_cell(first)?, parse_cell(last)?),
            None => {
                let cell = parse_cell(cells)?;
                (cell, cell)
            }
        };

        Self::new(&sheet, first.0, first.1, last.0, last.1)
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn first_row(&self) -> u32 {
        self.first_row
    }

    pub fn first_column(&self) -> u16 {
        self.first_column
    }

    pub fn last_row(&self) -> u32 {
        self.last_row
    }

    pub fn last_column(&self) -> u16 {
        self.last_column
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}'!{}{}:{}{}",
            self.sheet.replace('\'', "''"),
            column_name(self.first_column),
            self.first_row,
            column_name(self.last_column),
            self.last_row
        )
    }
}

/// Parses one `B2` / `$B$2` reference into 1-based `(row, column)`.
fn parse_cell(reference: &str) -> Result<(u32, u16), SheetError> {
    let invalid = || SheetError::InvalidRange(format!("invalid cell reference '{reference}'"));

    let cleaned: String = reference.trim().chars().filter(|c| *c != '$').collect();
    let split = cleaned
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (letters, digits) = cleaned.split_at(split);

    if letters.is_empty() || letters.len() > 3 || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }
    let column = letters
        .chars()
        .fold(0u32, |acc, c| acc * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A' + 1));
    let column = u16::try_from(column).map_err(|_| invalid())?;
    let row: u32 = digits.parse().map_err(|_| invalid())?;

    Ok((row, column))
}

/// 1-based column number to letters: 1 -> `A`, 28 -> `AB`.
fn column_name(column: u16) -> String {
    let mut column = u32::from(column);
    let mut letters = Vec::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        column = (column - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_range_with_sheet_prefix() {
        let range = CellRange::parse("Data!B2:D10").unwrap();
        assert_eq!(range.sheet(), "Data");
        assert_eq!(range.first_row(), 2);
        assert_eq!(range.first_column(), 2);
        assert_eq!(range.last_row(), 10);
        assert_eq!(range.last_column(), 4);
    }

    #[test]
    fn should_parse_quoted_sheet_and_absolute_single_cell() {
        let range = CellRange::parse("'Bob''s data'!$AA$7").unwrap();
        assert_eq!(range.sheet(), "Bob's data");
        assert_eq!((range.first_row(), range.first_column()), (7, 27));
        assert_eq!((range.last_row(), range.last_column()), (7, 27));
    }

    #[test]
    fn should_reject_invalid_notation() {
        for notation in ["B2:C3", "!B2", "Data!", "Data!2B", "Data!B0", "Data!ABCD1", "Data!D4:B2"] {
            let result = CellRange::parse(notation);
            assert!(
                matches!(result, Err(SheetError::InvalidRange(_))),
                "{notation} should be rejected"
            );
        }
    }

    #[test]
    fn should_reject_coordinates_beyond_the_sheet() {
        assert!(CellRange::new("Data", 1, 1, MAX_ROWS + 1, 1).is_err());
        assert!(CellRange::new("Data", 1, 1, 1, MAX_COLUMNS + 1).is_err());
        assert!(CellRange::parse("Data!XFE1").is_err());
        assert!(CellRange::parse("Data!XFD1048576").is_ok());
    }

    #[test]
    fn whole_sheet_should_anchor_at_a1() {
        let range = CellRange::whole_sheet("Export");
        assert_eq!((range.first_row(), range.first_column()), (1, 1));
        assert_eq!((range.last_row(), range.last_column()), (MAX_ROWS, MAX_COLUMNS));
    }

    #[test]
    fn display_should_round_trip_through_parse() {
        let range = CellRange::new("Q1 'sales'", 3, 28, 9, 30).unwrap();
        assert_eq!(range.to_string(), "'Q1 ''sales'''!AB3:AD9");
        assert_eq!(CellRange::parse(&range.to_string()).unwrap(), range);
    }
}
