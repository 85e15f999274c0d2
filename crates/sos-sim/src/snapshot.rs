//! End-of-tick views handed to observers.

use sos_behavior::{Action, UnitProperties};
use sos_core::{Location, PatientId, Tick};
use sos_env::{Environment, PatientStatus};

/// One patient as of the end of a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientState {
    pub id:       PatientId,
    pub location: Location,
    pub status:   PatientStatus,
    pub vitality: u32,
}

/// Everything an external consumer may read about a finished tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub tick:     Tick,
    pub patients: Vec<PatientState>,
    pub units:    Vec<UnitProperties>,
}

impl Snapshot {
    pub(crate) fn capture(tick: Tick, env: &Environment, units: Vec<UnitProperties>) -> Self {
        let patients = env
            .patients()
            .iter()
            .map(|p| PatientState {
                id:       p.id(),
                location: p.location(),
                status:   p.status(),
                vitality: p.vitality(),
            })
            .collect();
        Self { tick, patients, units }
    }

    pub fn discovered(&self) -> usize {
        self.patients
            .iter()
            .filter(|p| p.status == PatientStatus::Discovered)
            .count()
    }
}

/// Counts of what happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:       Tick,
    pub noops:      u32,
    pub discovers:  u32,
    pub moves:      u32,
    pub messages:   u32,
    /// Recipients reached by messages sent this tick.
    pub delivered:  u32,
    /// Patients claimed this tick.
    pub found:      u32,
    /// Patients discovered so far, as of the end of the tick.
    pub discovered: u32,
}

impl TickSummary {
    pub(crate) fn new(tick: Tick) -> Self {
        Self { tick, ..Default::default() }
    }

    pub(crate) fn record(&mut self, action: &Action) {
        match action {
            Action::Noop            => self.noops += 1,
            Action::DiscoverPatient => self.discovers += 1,
            Action::Move(_)         => self.moves += 1,
            Action::SendMessage(_)  => self.messages += 1,
        }
    }
}
