//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use sos_core::Tick;
use sos_sim::{SimObserver, Snapshot, TickSummary};
use tracing::info;

use crate::row::{PatientSnapshotRow, TickSummaryRow, UnitSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `world.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    snapshots:  usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, snapshots: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of snapshots written so far.
    pub fn snapshots(&self) -> usize {
        self.snapshots
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let tick = snapshot.tick.0;

        let patients: Vec<PatientSnapshotRow> = snapshot
            .patients
            .iter()
            .map(|p| PatientSnapshotRow::from_state(tick, p))
            .collect();
        let units: Vec<UnitSnapshotRow> = snapshot
            .units
            .iter()
            .map(|u| UnitSnapshotRow::from_properties(tick, u))
            .collect();

        let result = self
            .writer
            .write_patients(&patients)
            .and_then(|()| self.writer.write_units(&units));
        self.store_err(result);
        self.snapshots += 1;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
        info!(%final_tick, snapshots = self.snapshots, "output finished");
    }
}
