//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PlatformInfoRow, StepSummaryRow};

/// Errors are returned to the observer, which keeps the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of platform info rows.
    fn write_platform_rows(&mut self, rows: &[PlatformInfoRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
