//! Result output port for writing screening records.

use crate::domain::ScreeningRecord;

/// Port for outputting screening records.
pub trait ResultOutput: Send + Sync {
    /// Writes a single screening record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &ScreeningRecord) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
