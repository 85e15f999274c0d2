//! `sos-env` — the authoritative casualty state of the disaster area.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`patient`]     | `Patient`, `PatientStatus`                                 |
//! | [`density`]     | Expected patient density prior (`expected_density`)        |
//! | [`placement`]   | Bounded rejection sampling of patient locations            |
//! | [`environment`] | `Environment` — patient registry, occupancy, facilities    |
//!
//! Agents never mutate patients directly.  Every state transition
//! (placement, discovery, bleed) goes through an `Environment` method, and
//! the world is the only holder of `&mut Environment`.

pub mod density;
pub mod environment;
pub mod patient;
pub mod placement;


pub use density::{PLACEMENT_STD_DEV, axis_distribution, expected_density};
pub use environment::Environment;
pub use patient::{Patient, PatientStatus};
pub use placement::sample_patient_location;
