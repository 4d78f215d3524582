#[cfg(feature = "xlsx")]
/// This module provides an Excel item writer fed by the CSV serializer.
pub mod xlsx;
