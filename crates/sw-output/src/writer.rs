//! The `ExplorationWriter` trait implemented by output backends.

use crate::{MapUpdateRow, OutputResult, RunSummaryRow};

/// Sink for exploration rows.
///
/// [`OutputObserver`](crate::OutputObserver) calls these from inside the
/// coordinator loop and keeps the first error for
/// [`take_error`](crate::OutputObserver::take_error).
pub trait ExplorationWriter {
    /// Append one processed map update.
    fn write_map_update(&mut self, row: &MapUpdateRow) -> OutputResult<()>;

    /// Write the single end-of-run row.
    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()>;

    /// Flush every underlying file.  Calling it again does nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
