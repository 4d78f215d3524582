#![allow(dead_code)]

pub mod mocks;

pub use mocks::MockStream;

use std::{
    io::{self, Cursor, Seek, SeekFrom, Write},
    sync::{Arc, Mutex},
};

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};

/// In-memory stream that stays readable while a writer holds a clone of it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Cursor<Vec<u8>>>>);

impl SharedBuffer {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().get_ref().clone()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

impl Seek for SharedBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.lock().unwrap().seek(pos)
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn open_bytes(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(bytes)).expect("output should be a valid xlsx file")
}

pub fn sheet(bytes: Vec<u8>, name: &str) -> Range<Data> {
    open_bytes(bytes)
        .worksheet_range(name)
        .expect("sheet should exist")
}

/// String value of the 1-based cell `(row, column)`.
pub fn cell(range: &Range<Data>, row: u32, column: u32) -> Option<String> {
    match range.get_value((row - 1, column - 1)) {
        Some(Data::String(text)) => Some(text.clone()),
        _ => None,
    }
}
