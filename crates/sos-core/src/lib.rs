//! `sos-core` — foundational types for the SoS rescue simulation.
//!
//! This crate is a dependency of every other `sos-*` crate.  It intentionally
//! has no `sos-*` dependencies and minimal external ones (`rand`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PatientId`, `UnitId`                                 |
//! | [`location`]    | `Location`, `Direction`                               |
//! | [`grid`]        | `Grid<T>` — fixed-size bounds-checked 2D container    |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (the single shared random stream)            |
//! | [`topology`]    | `SosType`, `TopologyRules` lookup table               |
//! | [`config`]      | `ScenarioConfig`, `ObservationMode`                   |
//! | [`error`]       | `SosError`, `SosResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |
//!           | Required to load scenarios from TOML.                      |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod location;
pub mod rng;
pub mod time;
pub mod topology;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ObservationMode, ScenarioConfig};
pub use error::{SosError, SosResult};
pub use grid::Grid;
pub use ids::{PatientId, UnitId};
pub use location::{Direction, Location};
pub use rng::SimRng;
pub use time::Tick;
pub use topology::{SosType, TopologyRules};
