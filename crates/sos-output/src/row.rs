//! Plain data row types written by output backends.

use sos_behavior::{Phase, UnitProperties};
use sos_sim::{PatientState, TickSummary};
use sos_env::PatientStatus;

/// One patient at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientSnapshotRow {
    pub tick:       u64,
    pub patient_id: u32,
    pub x:          i32,
    pub y:          i32,
    pub discovered: bool,
    pub vitality:   u32,
}

impl PatientSnapshotRow {
    pub fn from_state(tick: u64, state: &PatientState) -> Self {
        Self {
            tick,
            patient_id: state.id.0,
            x:          state.location.x,
            y:          state.location.y,
            discovered: state.status == PatientStatus::Discovered,
            vitality:   state.vitality,
        }
    }
}

/// One unit at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSnapshotRow {
    pub tick:            u64,
    pub name:            String,
    pub role:            &'static str,
    /// Phase of the unit's most recent step; `None` before the first.
    pub phase:           Option<&'static str>,
    /// `None` for units without a location.
    pub x:               Option<i32>,
    pub y:               Option<i32>,
    pub believed:        u64,
    pub last_discovered: Option<u32>,
}

impl UnitSnapshotRow {
    pub fn from_properties(tick: u64, props: &UnitProperties) -> Self {
        Self {
            tick,
            name:            props.name.clone(),
            role:            props.role.as_str(),
            phase:           props.phase.map(Phase::as_str),
            x:               props.location.map(|l| l.x),
            y:               props.location.map(|l| l.y),
            believed:        props.believed as u64,
            last_discovered: props.last_discovered.map(|id| id.0),
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub noops:      u32,
    pub discovers:  u32,
    pub moves:      u32,
    pub messages:   u32,
    pub delivered:  u32,
    pub found:      u32,
    pub discovered: u32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:       s.tick.0,
            noops:      s.noops,
            discovers:  s.discovers,
            moves:      s.moves,
            messages:   s.messages,
            delivered:  s.delivered,
            found:      s.found,
            discovered: s.discovered,
        }
    }
}
