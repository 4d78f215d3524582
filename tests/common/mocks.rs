//! Mock of a seekable output stream.
use mockall::mock;

use std::io::{self, Seek, SeekFrom, Write};

mock! {
    pub Stream {}
    impl Write for Stream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
    impl Seek for Stream {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;
    }
}
