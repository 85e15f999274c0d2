//! Rescue units: search the grid, discover patients, answer the coordinator.

use rustc_hash::FxHashSet;
use sos_core::{Direction, Grid, Location, ObservationMode, PatientId, SimRng, SosError};
use sos_env::Environment;

use crate::{
    Action, BehaviorResult, CandidateAction, DecisionCore, FieldKey, FieldValue, Message,
    Purpose, SimContext,
};

/// Name of the coordinator role whose information requests units answer.
pub const COORDINATOR: &str = "ControlTower";

/// Benefit of the discover-patient candidate.
pub const DISCOVER_BENEFIT: i32 = 10;

/// Cost of the discover-patient candidate.
pub const DISCOVER_COST: i32 = 1;

/// Per-unit record of patients known to be discovered at each cell.
///
/// Entries are only ever added within a run.
pub type BeliefGrid = Grid<FxHashSet<PatientId>>;

/// A searching rescue unit.
#[derive(Clone, Debug)]
pub struct RescueUnit {
    name:            String,
    start:           Location,
    location:        Location,
    last_direction:  Option<Direction>,
    last_discovered: Option<PatientId>,
    belief:          BeliefGrid,
    pub(crate) core: DecisionCore,
}

impl RescueUnit {
    /// Create a unit that starts (and restarts on reset) at `start` on a
    /// `width × height` grid.
    pub fn new(
        name:   impl Into<String>,
        start:  Location,
        width:  usize,
        height: usize,
    ) -> BehaviorResult<Self> {
        let belief = BeliefGrid::new(width, height)?;
        if !belief.contains(start) {
            return Err(SosError::OutOfBounds { x: start.x, y: start.y, width, height }.into());
        }
        Ok(Self {
            name: name.into(),
            start,
            location: start,
            last_direction: None,
            last_discovered: None,
            belief,
            core: DecisionCore::new(),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// The patient this unit most recently claimed, if any.
    #[inline]
    pub fn last_discovered(&self) -> Option<PatientId> {
        self.last_discovered
    }

    #[inline]
    pub fn belief(&self) -> &BeliefGrid {
        &self.belief
    }

    #[inline]
    pub fn core(&self) -> &DecisionCore {
        &self.core
    }

    pub fn reset(&mut self) {
        self.belief.clear();
        self.location = self.start;
        self.last_direction = None;
        self.last_discovered = None;
        self.core.reset();
    }

    // ── Belief update ─────────────────────────────────────────────────────

    /// Copy the environment's discovered patients into the belief grid:
    /// the current cell only, or every cell in global mode.
    pub(crate) fn observe(&mut self, ctx: &SimContext<'_>) {
        match ctx.observation {
            ObservationMode::Local => absorb(&mut self.belief, ctx.env, self.location),
            ObservationMode::Global => {
                for y in 0..self.belief.height() as i32 {
                    for x in 0..self.belief.width() as i32 {
                        absorb(&mut self.belief, ctx.env, Location::new(x, y));
                    }
                }
            }
        }
    }

    /// Merge `Discovered` reports from responses and informs into belief.
    ///
    /// A report only counts if the environment agrees the patient is
    /// discovered; it is filed under the patient's actual cell.
    pub(crate) fn consume_information(&mut self, ctx: &SimContext<'_>) {
        for message in self.core.take_information() {
            let Some(FieldValue::Discovered(Some(id))) = message.get(FieldKey::Discovered) else {
                continue;
            };
            if let Some(patient) = ctx.env.patient(*id).filter(|p| p.is_discovered()) {
                self.belief[patient.location()].insert(*id);
            }
        }
    }

    // ── Candidate generation ──────────────────────────────────────────────

    pub(crate) fn generate_active_actions(&mut self, _ctx: &SimContext<'_>) {
        self.core.push_immediate(CandidateAction::new(
            Action::DiscoverPatient,
            DISCOVER_BENEFIT,
            DISCOVER_COST,
        ));
    }

    /// Answer coordinator location/discovery requests when the topology
    /// requires acknowledgement.  Handled requests leave the queue.
    pub(crate) fn generate_passive_actions(&mut self, ctx: &SimContext<'_>) {
        let acknowledge = ctx.sos_type.rules().requires_acknowledgement;

        for request in self.core.take_requests() {
            if !acknowledge || request.sender != COORDINATOR || request.purpose != Purpose::RequestInfo {
                continue;
            }

            if request.has(FieldKey::Location) {
                let report = self
                    .response("Respond location report")
                    .with(FieldKey::Location, FieldValue::Location(self.location));
                self.core.push_immediate(CandidateAction::new(Action::SendMessage(report), 0, 0));
            }

            if request.has(FieldKey::Discovered) {
                let report = self
                    .response("Respond discovery report")
                    .with(FieldKey::Discovered, FieldValue::Discovered(self.last_discovered));
                self.core.push_immediate(CandidateAction::new(Action::SendMessage(report), 0, 0));
            }
        }
    }

    /// Offer every in-bounds, non-reversing single-cell move.
    ///
    /// One uncertainty draw is taken per offered move, in
    /// [`Direction::ALL`] order.
    pub(crate) fn generate_normal_actions(&mut self, ctx: &SimContext<'_>, rng: &mut SimRng) {
        if !ctx.sos_type.rules().autonomous_movement {
            return;
        }

        for direction in Direction::ALL {
            if self.last_direction == Some(direction.opposite()) {
                continue;
            }
            let next = self.location.step(direction);
            if !self.belief.contains(next) {
                continue;
            }
            let cost = self.move_cost(next, ctx, rng);
            self.core.push_normal(CandidateAction::new(Action::Move(direction), 0, cost));
        }
    }

    /// `uniform{0,1} + |belief at next| − expected density at next`.
    ///
    /// Cells already known to hold discovered patients cost more; cells the
    /// prior expects to be crowded cost less.
    pub fn move_cost(&self, next: Location, ctx: &SimContext<'_>, rng: &mut SimRng) -> i32 {
        let uncertainty: i32 = rng.gen_range(0..2);
        let known = self.belief[next].len() as i32;
        let expected = ctx.env.expected_density()[next] as i32;
        uncertainty + known - expected
    }

    fn response(&self, name: &str) -> Message {
        Message::new(self.name.as_str(), COORDINATOR, Purpose::Response).named(name)
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Claim an undiscovered patient at the current cell.
    ///
    /// On success the patient enters belief and becomes the last discovered
    /// patient.  `None` (nothing left here) changes nothing.
    pub fn discover(&mut self, env: &mut Environment) -> Option<PatientId> {
        let found = env.take_undiscovered_patient(self.location)?;
        self.belief[self.location].insert(found);
        self.last_discovered = Some(found);
        Some(found)
    }

    /// Move one cell and remember the direction.
    ///
    /// # Panics
    /// Panics if the move leaves the grid: candidate generation never offers
    /// such a move, so reaching this is an internal invariant violation.
    pub fn apply_move(&mut self, direction: Direction) {
        let next = self.location.step(direction);
        assert!(
            self.belief.contains(next),
            "{}: move {direction} from {} leaves the grid",
            self.name,
            self.location,
        );
        self.location = next;
        self.last_direction = Some(direction);
    }
}

fn absorb(belief: &mut BeliefGrid, env: &Environment, location: Location) {
    belief[location].extend(env.discovered_patients(location));
}
