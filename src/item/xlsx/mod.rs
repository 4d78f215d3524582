//! Excel support for writing CSV records into workbook cells.
//!
//! This module lets the `csv` serializer target a `rust_xlsxwriter` workbook
//! instead of a text stream. Every record becomes one worksheet row and every
//! field one cell, so delimiters and line terminators never reach the output.
//!
//! # Module Architecture
//!
//! 1. **XlsxItemWriter**: tracks the row cursor and the row/column offsets,
//!    writes sanitized fields into cells and saves the workbook on close.
//!
//! 2. **XlsxItemWriterBuilder**: validates the [`CsvConfig`] and picks the
//!    target: a new workbook saved to a path or stream, a sheet of a workbook
//!    the caller keeps, or an explicit [`CellRange`].
//!
//! # Ownership
//!
//! Workbooks created by the builder belong to the writer and are saved and
//! released by [`XlsxItemWriter::close`]. Workbooks passed in are borrowed
//! until the writer is dropped and the caller saves them.
//!
//! # Examples
//!
//! ## Writing serde records
//!
//! ```
//! use csv_sheet_rs::core::item::ItemWriter;
//! use csv_sheet_rs::item::xlsx::XlsxItemWriterBuilder;
//! use serde::Serialize;
//! use std::io::Cursor;
//!
//! #[derive(Serialize)]
//! struct Person {
//!     name: String,
//!     age: u8,
//! }
//!
//! let people = vec![
//!     Person { name: "Alice".to_string(), age: 28 },
//!     Person { name: "Bob".to_string(), age: 35 },
//! ];
//!
//! let mut buffer = Cursor::new(Vec::new());
//! {
//!     let writer = XlsxItemWriterBuilder::new()
//!         .has_headers(true)
//!         .sheet_name("People")
//!         .from_writer(&mut buffer)
//!         .unwrap();
//!
//!     writer.write(people.as_slice()).unwrap();
//!     ItemWriter::<Person>::close(&writer).unwrap();
//! } // writer is dropped here, releasing the borrow
//!
//! assert!(!buffer.into_inner().is_empty());
//! ```
//!
//! ## Writing into a workbook you keep
//!
//! ```
//! use csv_sheet_rs::item::xlsx::XlsxItemWriterBuilder;
//! use rust_xlsxwriter::Workbook;
//!
//! let mut workbook = Workbook::new();
//! {
//!     let writer = XlsxItemWriterBuilder::new()
//!         .sheet_name("Raw")
//!         .from_workbook(&mut workbook)
//!         .unwrap();
//!     writer.set_row_offset(1);
//!     writer.write_record(["a", "b"]).unwrap();
//!     writer.close().unwrap();
//! }
//! let bytes = workbook.save_to_buffer().unwrap();
//! assert!(!bytes.is_empty());
//! ```

/// Writer settings and sheet name rules.
pub mod config;

/// Target ranges in A1 notation.
pub mod range;

mod sanitize;

/// A module providing facilities for writing CSV records into worksheets.
pub mod xlsx_writer;

pub use config::{CsvConfig, DEFAULT_SHEET_NAME};
pub use range::CellRange;
pub use sanitize::replace_control_characters;
pub use xlsx_writer::{XlsxItemWriter, XlsxItemWriterBuilder};
