//! `sos-behavior` — the agent decision core.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`message`]  | `Message`, `Purpose`, payload `FieldKey`/`FieldValue`            |
//! | [`action`]   | `Action` (executed by the world), `CandidateAction`              |
//! | [`context`]  | `SimContext<'a>` + named resource lookup (`ResourceKey`)         |
//! | [`decision`] | `Phase`, `DecisionCore` — queues, candidate lists, selection     |
//! | [`rescue`]   | `RescueUnit` — observation, cost model, movement                 |
//! | [`facility`] | `Facility` — fixed-location registered entity (hospital)         |
//! | [`unit`]     | `Unit` — tagged variant dispatching the shared step protocol     |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Step protocol
//!
//! Every registered unit is stepped once per tick by the world:
//!
//! 1. **Update belief** — observe the environment, consume queued
//!    information, then apply the phase override (an idle passive phase
//!    falls through to normal; pending requests pre-empt normal).
//! 2. **Generate** — build candidates for the current phase only, then
//!    advance `Active → Passive → Normal → Active`.
//! 3. **Select** — immediate candidates beat normal ones unconditionally;
//!    within a list, shuffle then stable-sort by utility, take the first.
//!
//! The returned [`Action`] is plain data.  The world executes it before the
//! next unit is stepped, so units never hold `&mut` world state.

pub mod action;
pub mod context;
pub mod decision;
pub mod error;
pub mod facility;
pub mod message;
pub mod rescue;
pub mod unit;

#[cfg(test)]
mod tests;

pub use action::{Action, CandidateAction};
pub use context::{AgentInfo, Resource, ResourceKey, SimContext};
pub use decision::{DecisionCore, Phase};
pub use error::{BehaviorError, BehaviorResult};
pub use facility::Facility;
pub use message::{FieldKey, FieldValue, Message, Purpose};
pub use rescue::{BeliefGrid, COORDINATOR, DISCOVER_BENEFIT, DISCOVER_COST, RescueUnit};
pub use unit::{Unit, UnitProperties, UnitRole};
