//! `sos-output` — simulation output writers.
//!
//! | Backend | Files created                                                         |
//! |---------|-----------------------------------------------------------------------|
//! | CSV     | `patient_snapshots.csv`, `unit_snapshots.csv`, `tick_summaries.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sos_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sos_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! world.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{PatientSnapshotRow, TickSummaryRow, UnitSnapshotRow};
pub use writer::OutputWriter;
