//! `Unit`: the tagged variant every registered agent is stored as.
//!
//! The shared capability set {observe, consume information, generate
//! active/passive/normal candidates, properties} is dispatched by matching
//! on the variant tag; the protocol that strings them together lives here
//! once, in [`Unit::step`].

use std::fmt;

use sos_core::{Direction, Location, PatientId, SimRng};
use sos_env::Environment;
use tracing::trace;

use crate::{Action, BeliefGrid, DecisionCore, Facility, Message, Phase, RescueUnit, SimContext};

/// Role tag of a registered unit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum UnitRole {
    Rescue,
    Facility,
}

impl UnitRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitRole::Rescue   => "rescue",
            UnitRole::Facility => "facility",
        }
    }
}

impl fmt::Display for UnitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally visible properties of a unit, as of the end of a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitProperties {
    pub name:            String,
    pub role:            UnitRole,
    /// Phase the most recent step acted in; `None` before the first step.
    pub phase:           Option<Phase>,
    pub location:        Option<Location>,
    /// Per-cell patients the unit believes in, for roles that keep a belief.
    pub belief:          Option<BeliefGrid>,
    /// Patients in `belief`, summed over all cells.
    pub believed:        usize,
    pub last_discovered: Option<PatientId>,
}

/// A decision-capable registered agent.
#[derive(Clone, Debug)]
pub enum Unit {
    Rescue(RescueUnit),
    Facility(Facility),
}

impl From<RescueUnit> for Unit {
    fn from(unit: RescueUnit) -> Self {
        Unit::Rescue(unit)
    }
}

impl From<Facility> for Unit {
    fn from(facility: Facility) -> Self {
        Unit::Facility(facility)
    }
}

impl Unit {
    pub fn name(&self) -> &str {
        match self {
            Unit::Rescue(u)   => u.name(),
            Unit::Facility(f) => f.name(),
        }
    }

    pub fn role(&self) -> UnitRole {
        match self {
            Unit::Rescue(_)   => UnitRole::Rescue,
            Unit::Facility(_) => UnitRole::Facility,
        }
    }

    /// The unit's reported location property, used for location-filtered
    /// message routing.
    pub fn location(&self) -> Option<Location> {
        match self {
            Unit::Rescue(u)   => Some(u.location()),
            Unit::Facility(f) => Some(f.location()),
        }
    }

    pub fn core(&self) -> &DecisionCore {
        match self {
            Unit::Rescue(u)   => &u.core,
            Unit::Facility(f) => &f.core,
        }
    }

    fn core_mut(&mut self) -> &mut DecisionCore {
        match self {
            Unit::Rescue(u)   => &mut u.core,
            Unit::Facility(f) => &mut f.core,
        }
    }

    /// The belief grid, for roles that keep one.
    pub fn belief(&self) -> Option<&BeliefGrid> {
        match self {
            Unit::Rescue(u)   => Some(u.belief()),
            Unit::Facility(_) => None,
        }
    }

    pub fn as_rescue(&self) -> Option<&RescueUnit> {
        match self {
            Unit::Rescue(u) => Some(u),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        match self {
            Unit::Rescue(u)   => u.reset(),
            Unit::Facility(f) => f.reset(),
        }
    }

    /// Queue an inbound message (see [`DecisionCore::receive`]).
    pub fn receive_message(&mut self, message: Message) {
        self.core_mut().receive(message);
    }

    pub fn properties(&self) -> UnitProperties {
        let belief = self.belief().cloned();
        let believed = belief
            .as_ref()
            .map_or(0, |grid| grid.iter().map(|(_, cell)| cell.len()).sum());
        UnitProperties {
            name: self.name().to_owned(),
            role: self.role(),
            phase: self.core().acting_phase(),
            location: self.location(),
            belief,
            believed,
            last_discovered: self.as_rescue().and_then(RescueUnit::last_discovered),
        }
    }

    // ── Step protocol ─────────────────────────────────────────────────────

    /// One full decision step: update belief, generate candidates for the
    /// current phase, select exactly one action.
    pub fn step(&mut self, ctx: &SimContext<'_>, rng: &mut SimRng) -> Action {
        self.update_belief(ctx);
        self.generate_actions(ctx, rng);
        let action = self.core_mut().select(rng);
        trace!(
            unit  = self.name(),
            tick  = ctx.tick.0,
            phase = ?self.core().acting_phase(),
            action = action.label(),
            "selected action"
        );
        action
    }

    /// Observe, consume queued information, then apply the phase override.
    pub fn update_belief(&mut self, ctx: &SimContext<'_>) {
        if let Unit::Rescue(u) = self {
            u.observe(ctx);
        }

        if !self.core().information().is_empty() {
            match self {
                Unit::Rescue(u)   => u.consume_information(ctx),
                Unit::Facility(f) => f.consume_information(),
            }
        }

        self.core_mut().apply_phase_override();
    }

    fn generate_actions(&mut self, ctx: &SimContext<'_>, rng: &mut SimRng) {
        let phase = self.core_mut().begin_generation();
        match (self, phase) {
            (Unit::Rescue(u), Phase::ActiveImmediate)  => u.generate_active_actions(ctx),
            (Unit::Rescue(u), Phase::PassiveImmediate) => u.generate_passive_actions(ctx),
            (Unit::Rescue(u), Phase::Normal)           => u.generate_normal_actions(ctx, rng),
            (Unit::Facility(f), Phase::PassiveImmediate) => f.generate_passive_actions(),
            (Unit::Facility(_), _) => {}
        }
    }

    // ── Execution hooks ───────────────────────────────────────────────────

    /// Execute a discover-patient action.  Facilities never discover.
    pub fn execute_discovery(&mut self, env: &mut Environment) -> Option<PatientId> {
        match self {
            Unit::Rescue(u)   => u.discover(env),
            Unit::Facility(_) => None,
        }
    }

    /// Execute a move action.
    ///
    /// # Panics
    /// Panics if the unit cannot move (a facility) or the move leaves the
    /// grid: both mean candidate generation broke its own preconditions.
    pub fn execute_move(&mut self, direction: Direction) {
        match self {
            Unit::Rescue(u) => u.apply_move(direction),
            Unit::Facility(f) => panic!("{}: facilities cannot move {direction}", f.name()),
        }
    }
}
