//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PatientSnapshotRow, TickSummaryRow, UnitSnapshotRow};

/// A sink for snapshot and summary rows.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which stores the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of patient snapshots.
    fn write_patients(&mut self, rows: &[PatientSnapshotRow]) -> OutputResult<()>;

    /// Write a batch of unit snapshots.
    fn write_units(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
