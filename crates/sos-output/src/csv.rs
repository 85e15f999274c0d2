//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `patient_snapshots.csv`
//! - `unit_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PatientSnapshotRow, TickSummaryRow, UnitSnapshotRow};

pub const PATIENT_HEADER: [&str; 6] = ["tick", "patient_id", "x", "y", "discovered", "vitality"];

pub const UNIT_HEADER: [&str; 8] =
    ["tick", "name", "role", "phase", "x", "y", "believed", "last_discovered"];

pub const SUMMARY_HEADER: [&str; 8] =
    ["tick", "noops", "discovers", "moves", "messages", "delivered", "found", "discovered"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    patients:  Writer<File>,
    units:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut patients = Writer::from_path(dir.join("patient_snapshots.csv"))?;
        patients.write_record(PATIENT_HEADER)?;

        let mut units = Writer::from_path(dir.join("unit_snapshots.csv"))?;
        units.write_record(UNIT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { patients, units, summaries, finished: false })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_patients(&mut self, rows: &[PatientSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.patients.write_record(&[
                row.tick.to_string(),
                row.patient_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                (row.discovered as u8).to_string(),
                row.vitality.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_units(&mut self, rows: &[UnitSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.units.write_record(&[
                row.tick.to_string(),
                row.name.clone(),
                row.role.to_owned(),
                opt(row.phase),
                opt(row.x),
                opt(row.y),
                row.believed.to_string(),
                opt(row.last_discovered),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.noops.to_string(),
            row.discovers.to_string(),
            row.moves.to_string(),
            row.messages.to_string(),
            row.delivered.to_string(),
            row.found.to_string(),
            row.discovered.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.patients.flush()?;
        self.units.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
