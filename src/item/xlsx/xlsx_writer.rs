use std::{
    cell::{Cell, RefCell},
    io::{Seek, Write},
    mem,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;

use super::{
    config::{validate_sheet_name, CsvConfig, DEFAULT_SHEET_NAME},
    range::{CellRange, MAX_COLUMNS, MAX_ROWS},
    sanitize::replace_control_characters,
};
use crate::{
    core::item::{ItemWriter, ItemWriterResult},
    error::SheetError,
};

/// Any seekable byte sink a workbook can be saved into.
pub trait SeekWrite: Write + Seek + Send {}

impl<T: Write + Seek + Send> SeekWrite for T {}

enum WorkbookHandle<'a> {
    Owned(Box<Workbook>),
    Borrowed(&'a mut Workbook),
}

impl WorkbookHandle<'_> {
    fn get_mut(&mut self) -> &mut Workbook {
        match self {
            WorkbookHandle::Owned(workbook) => workbook.as_mut(),
            WorkbookHandle::Borrowed(workbook) => &mut **workbook,
        }
    }
}

/// Where the workbook goes on close.
enum Destination<'a> {
    Path(PathBuf),
    Stream(Box<dyn SeekWrite + 'a>),
    /// The caller saves the workbook.
    Caller,
}

struct WriterState<'a> {
    workbook: Option<WorkbookHandle<'a>>,
    destination: Destination<'a>,
    pending: Vec<String>,
}

impl WriterState<'_> {
    fn worksheet(&mut self, sheet: &str) -> Result<&mut Worksheet, SheetError> {
        let handle = self.workbook.as_mut().ok_or(SheetError::ObjectDisposed)?;
        Ok(handle.get_mut().worksheet_from_name(sheet)?)
    }
}

/// Writes CSV records into the cells of a worksheet.
///
/// Each record lands on its own row, one field per column, starting at the
/// top-left corner of the target range. The row and column offsets shift every
/// record written after they are changed. Nothing is persisted until
/// [`close`](XlsxItemWriter::close).
///
/// # Examples
///
/// ```
/// use csv_sheet_rs::item::xlsx::XlsxItemWriterBuilder;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// {
///     let writer = XlsxItemWriterBuilder::new().from_writer(&mut buffer).unwrap();
///     writer.write_record(["city", "country"]).unwrap();
///     writer.write_record(["Boston", "United States"]).unwrap();
///     writer.close().unwrap();
/// }
/// assert!(!buffer.into_inner().is_empty());
/// ```
pub struct XlsxItemWriter<'a> {
    state: RefCell<WriterState<'a>>,
    config: CsvConfig,
    target: CellRange,
    owns_workbook: bool,
    row: Cell<u32>,
    row_offset: Cell<i32>,
    column_offset: Cell<i32>,
    headers_written: Cell<bool>,
    closed: Cell<bool>,
}

impl<'a> XlsxItemWriter<'a> {
    fn new(
        config: CsvConfig,
        target: CellRange,
        workbook: WorkbookHandle<'a>,
        destination: Destination<'a>,
    ) -> Self {
        let owns_workbook = matches!(workbook, WorkbookHandle::Owned(_));
        debug!(
            "Sheet writer ready on {} (owns workbook: {})",
            target, owns_workbook
        );

        XlsxItemWriter {
            state: RefCell::new(WriterState {
                workbook: Some(workbook),
                destination,
                pending: Vec::new(),
            }),
            config,
            target,
            owns_workbook,
            row: Cell::new(1),
            row_offset: Cell::new(0),
            column_offset: Cell::new(0),
            headers_written: Cell::new(false),
            closed: Cell::new(false),
        }
    }

    /// Writes one record on the current row and moves to the next row.
    ///
    /// Field `j` goes to column `first_column + column_offset + j` of row
    /// `first_row + row - 1 + row_offset`. Empty fields leave their cell
    /// untouched. A failure part-way leaves the fields already written in place
    /// and does not advance the row. Once the cursor passes the last worksheet
    /// row, every record fails with [`SheetError::CellOutOfBounds`].
    pub fn write_record<I, T>(&self, record: I) -> ItemWriterResult
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.ensure_open()?;
        if self.row.get() > MAX_ROWS {
            return Err(SheetError::CellOutOfBounds {
                row: i64::from(self.row.get()),
                column: i64::from(self.target.first_column()),
            });
        }

        let row = i64::from(self.target.first_row())
            + i64::from(self.row.get())
            - 1
            + i64::from(self.row_offset.get());
        let first_column =
            i64::from(self.target.first_column()) + i64::from(self.column_offset.get());

        let mut state = self.state.borrow_mut();
        let worksheet = state.worksheet(self.target.sheet())?;

        for (index, field) in record.into_iter().enumerate() {
            let text = field.as_ref();
            if text.is_empty() {
                continue;
            }
            let (cell_row, cell_column) = to_cell(row, first_column + index as i64)?;
            let cleaned = replace_control_characters(text);
            worksheet.write_string(cell_row, cell_column, &*cleaned)?;
        }

        self.row.set(self.row.get().saturating_add(1));
        Ok(())
    }

    /// Buffers one field of the current record until [`next_record`](Self::next_record).
    pub fn write_field<T: AsRef<str>>(&self, field: T) -> ItemWriterResult {
        self.ensure_open()?;
        self.state
            .borrow_mut()
            .pending
            .push(field.as_ref().to_string());
        Ok(())
    }

    /// Writes the buffered fields as one record.
    pub fn next_record(&self) -> ItemWriterResult {
        self.ensure_open()?;
        let fields = mem::take(&mut self.state.borrow_mut().pending);
        self.write_record(&fields)
    }

    /// Serializes one item with `csv` and writes the resulting record(s).
    ///
    /// With headers enabled, the first struct serialized also writes a header
    /// row from its field names. An item that fails to serialize writes
    /// nothing.
    pub fn serialize<T: Serialize>(&self, item: &T) -> ItemWriterResult {
        self.ensure_open()?;

        let with_headers = self.config.has_headers && !self.headers_written.get();
        let mut serializer = self.config.csv_writer(with_headers);
        serializer.serialize(item)?;
        let data = serializer
            .into_inner()
            .map_err(|error| SheetError::Io(error.into_error()))?;
        if with_headers {
            self.headers_written.set(true);
        }

        let mut reader = self.config.csv_reader(&data);
        for record in reader.records() {
            self.write_record(&record?)?;
        }
        Ok(())
    }

    /// Record terminator. Rows are addressed cell by cell, so there is no
    /// line to end.
    pub fn write_line(&self) -> ItemWriterResult {
        Ok(())
    }

    /// Items are serialized into a fresh buffer each time, so there is nothing
    /// to flush. The workbook itself is only saved on close.
    pub fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    /// Saves the workbook to its destination and releases it.
    ///
    /// Only the first call does anything; later calls return `Ok(())`.
    /// Workbooks handed in by the caller are neither saved nor released.
    pub fn close(&self) -> ItemWriterResult {
        if self.closed.replace(true) {
            return Ok(());
        }

        let flushed = self.flush();
        let mut state = self.state.borrow_mut();
        let persisted = flushed.and_then(|()| persist(&mut state));

        state.destination = Destination::Caller;
        if self.owns_workbook {
            state.workbook = None;
            debug!("Released workbook of {}", self.target);
        }

        persisted
    }

    /// Current row cursor, 1 before the first record.
    pub fn row(&self) -> u32 {
        self.row.get()
    }

    pub fn row_offset(&self) -> i32 {
        self.row_offset.get()
    }

    pub fn set_row_offset(&self, offset: i32) {
        self.row_offset.set(offset);
    }

    pub fn column_offset(&self) -> i32 {
        self.column_offset.get()
    }

    pub fn set_column_offset(&self, offset: i32) {
        self.column_offset.set(offset);
    }

    pub fn target(&self) -> &CellRange {
        &self.target
    }

    /// Whether the writer created the workbook and is responsible for it.
    pub fn owns_workbook(&self) -> bool {
        self.owns_workbook
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn ensure_open(&self) -> ItemWriterResult {
        if self.closed.get() {
            return Err(SheetError::ObjectDisposed);
        }
        Ok(())
    }
}

fn persist(state: &mut WriterState<'_>) -> ItemWriterResult {
    let WriterState {
        workbook,
        destination,
        ..
    } = state;
    let Some(handle) = workbook.as_mut() else {
        return Ok(());
    };

    match destination {
        Destination::Path(path) => {
            handle.get_mut().save(path.as_path())?;
            info!("Saved workbook to {}", path.display());
        }
        Destination::Stream(stream) => {
            handle.get_mut().save_to_writer(&mut **stream)?;
            stream.flush()?;
            info!("Saved workbook to stream");
        }
        Destination::Caller => debug!("Workbook belongs to the caller, not saving it"),
    }
    Ok(())
}

/// 1-based coordinates to the 0-based ones `rust_xlsxwriter` expects.
fn to_cell(row: i64, column: i64) -> Result<(u32, u16), SheetError> {
    if !(1..=i64::from(MAX_ROWS)).contains(&row) || !(1..=i64::from(MAX_COLUMNS)).contains(&column) {
        return Err(SheetError::CellOutOfBounds { row, column });
    }
    Ok(((row - 1) as u32, (column - 1) as u16))
}

impl<T: Serialize> ItemWriter<T> for XlsxItemWriter<'_> {
    fn write(&self, items: &[T]) -> ItemWriterResult {
        for item in items {
            self.serialize(item)?;
        }
        Ok(())
    }

    fn flush(&self) -> ItemWriterResult {
        XlsxItemWriter::flush(self)
    }

    fn open(&self) -> ItemWriterResult {
        debug!("Opening sheet writer on {}", self.target);
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        XlsxItemWriter::close(self)
    }
}

impl Drop for XlsxItemWriter<'_> {
    fn drop(&mut self) {
        if !self.closed.replace(true) {
            warn!(
                "Sheet writer on {} dropped without close, workbook not saved",
                self.target
            );
            if self.owns_workbook {
                self.state.get_mut().workbook = None;
            }
        }
    }
}

/// Builder for [`XlsxItemWriter`].
///
/// The `from_*` methods pick the destination, from the least precise target
/// (a new workbook saved to a path or stream) to the most precise (a cell
/// range in a workbook the caller keeps).
///
/// # Examples
///
/// ```
/// use csv_sheet_rs::item::xlsx::{CellRange, XlsxItemWriterBuilder};
/// use rust_xlsxwriter::Workbook;
///
/// let mut workbook = Workbook::new();
/// workbook.add_worksheet().set_name("Report").unwrap();
///
/// let range = CellRange::parse("Report!B2:D20").unwrap();
/// let writer = XlsxItemWriterBuilder::new()
///     .from_range(&mut workbook, range)
///     .unwrap();
/// writer.write_record(["x", "y"]).unwrap();
/// writer.close().unwrap();
/// ```
pub struct XlsxItemWriterBuilder {
    config: CsvConfig,
    sheet_name: String,
}

impl Default for XlsxItemWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxItemWriterBuilder {
    pub fn new() -> XlsxItemWriterBuilder {
        XlsxItemWriterBuilder {
            config: CsvConfig::default(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> XlsxItemWriterBuilder {
        self.config.delimiter = delimiter;
        self
    }

    pub fn quote(mut self, quote: u8) -> XlsxItemWriterBuilder {
        self.config.quote = quote;
        self
    }

    pub fn has_headers(mut self, yes: bool) -> XlsxItemWriterBuilder {
        self.config.has_headers = yes;
        self
    }

    pub fn config(mut self, config: CsvConfig) -> XlsxItemWriterBuilder {
        self.config = config;
        self
    }

    /// Sheet used by the path, stream and workbook constructors. Defaults to `Export`.
    pub fn sheet_name(mut self, name: &str) -> XlsxItemWriterBuilder {
        self.sheet_name = name.to_string();
        self
    }

    /// A new workbook, saved to `path` on close.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<XlsxItemWriter<'static>, SheetError> {
        self.validate()?;
        let mut workbook = Box::new(Workbook::new());
        ensure_worksheet(&mut workbook, &self.sheet_name)?;

        Ok(XlsxItemWriter::new(
            self.config,
            CellRange::whole_sheet(&self.sheet_name),
            WorkbookHandle::Owned(workbook),
            Destination::Path(path.as_ref().to_path_buf()),
        ))
    }

    /// A new workbook, saved to `wtr` on close. The stream is flushed after
    /// the save.
    pub fn from_writer<'a, W: Write + Seek + Send + 'a>(
        self,
        wtr: W,
    ) -> Result<XlsxItemWriter<'a>, SheetError> {
        self.validate()?;
        let mut workbook = Box::new(Workbook::new());
        ensure_worksheet(&mut workbook, &self.sheet_name)?;

        Ok(XlsxItemWriter::new(
            self.config,
            CellRange::whole_sheet(&self.sheet_name),
            WorkbookHandle::Owned(workbook),
            Destination::Stream(Box::new(wtr)),
        ))
    }

    /// Writes into the configured sheet of `workbook`, adding the sheet if it
    /// is missing. The caller saves the workbook.
    pub fn from_workbook(self, workbook: &mut Workbook) -> Result<XlsxItemWriter<'_>, SheetError> {
        self.validate()?;
        ensure_worksheet(workbook, &self.sheet_name)?;

        Ok(XlsxItemWriter::new(
            self.config,
            CellRange::whole_sheet(&self.sheet_name),
            WorkbookHandle::Borrowed(workbook),
            Destination::Caller,
        ))
    }

    /// Writes into the existing sheet `sheet` of `workbook`, starting at `A1`.
    pub fn from_worksheet<'a>(
        self,
        workbook: &'a mut Workbook,
        sheet: &str,
    ) -> Result<XlsxItemWriter<'a>, SheetError> {
        self.config.validate()?;
        require_worksheet(workbook, sheet)?;

        Ok(XlsxItemWriter::new(
            self.config,
            CellRange::whole_sheet(sheet),
            WorkbookHandle::Borrowed(workbook),
            Destination::Caller,
        ))
    }

    /// Writes into `range`, whose top-left cell becomes the origin of every
    /// record. The range's sheet must exist.
    pub fn from_range(
        self,
        workbook: &mut Workbook,
        range: CellRange,
    ) -> Result<XlsxItemWriter<'_>, SheetError> {
        self.config.validate()?;
        require_worksheet(workbook, range.sheet())?;

        Ok(XlsxItemWriter::new(
            self.config,
            range,
            WorkbookHandle::Borrowed(workbook),
            Destination::Caller,
        ))
    }

    fn validate(&self) -> Result<(), SheetError> {
        self.config.validate()?;
        validate_sheet_name(&self.sheet_name)
    }
}

fn ensure_worksheet(workbook: &mut Workbook, name: &str) -> Result<(), SheetError> {
    if workbook.worksheet_from_name(name).is_err() {
        workbook.add_worksheet().set_name(name)?;
        debug!("Added worksheet '{}'", name);
    }
    Ok(())
}

fn require_worksheet(workbook: &mut Workbook, name: &str) -> Result<(), SheetError> {
    workbook
        .worksheet_from_name(name)
        .map(|_| ())
        .map_err(|_| SheetError::Configuration(format!("worksheet '{name}' does not exist")))
}
