use crate::error::SheetError;

/// Result returned by every [`ItemWriter`] operation.
pub type ItemWriterResult = Result<(), SheetError>;

/// The output side of an export: receives items one chunk at a time.
///
/// Writers take `&self` and keep their mutable state behind interior
/// mutability, so a single writer can be shared by the code producing items.
pub trait ItemWriter<O> {
    fn write(&self, items: &[O]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}
