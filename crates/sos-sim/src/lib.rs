//! `sos-sim` — the world and its tick loop.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Bleed    — every patient loses one unit of vitality.
//!   ② Step     — each unit, in registry order, runs Unit::step and
//!                selects exactly one Action.
//!   ③ Execute  — immediately, before the next unit:
//!                  DiscoverPatient → claim a patient at the unit's cell
//!                  Move(dir)       → displace the unit one cell
//!                  SendMessage(m)  → prefix-route m to its recipients
//!                  Noop            → nothing
//!   ④ Observe  — on_tick_end, then on_snapshot every
//!                output_interval_ticks.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sos_core::{Location, ScenarioConfig};
//! use sos_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(ScenarioConfig::default())
//!     .rescue_units("Rescue", 3, Location::new(9, 9))
//!     .build()?;
//! world.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod snapshot;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use snapshot::{PatientState, Snapshot, TickSummary};
pub use world::World;
