use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised while building a sheet writer or writing records into it.
pub enum SheetError {
    /// The writer configuration failed validation.
    #[error("Configuration: {0}")]
    Configuration(String),

    /// A record was written after the writer was closed.
    #[error("Cannot write to a closed sheet writer")]
    ObjectDisposed,

    /// A cell range could not be parsed or lies outside the worksheet.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A computed cell position falls outside the worksheet grid.
    #[error("Cell ({row}, {column}) is outside the worksheet")]
    CellOutOfBounds { row: i64, column: i64 },

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[cfg(feature = "xlsx")]
    #[error("Serialization: {0}")]
    Serialization(#[from] csv::Error),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}
