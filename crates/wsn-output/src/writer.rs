//! The `OutputWriter` trait implemented by backend writers.

use crate::{FrameSummaryRow, OutputResult, ScheduleRow};

/// Sink for simulation output rows.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the simulator.
pub trait OutputWriter {
    /// Write one frame summary row.
    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Write the transmissions of one schedule.
    fn write_schedule(&mut self, rows: &[ScheduleRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
