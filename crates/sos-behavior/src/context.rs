//! Read-only simulation state passed to every unit callback.

use std::fmt;
use std::str::FromStr;

use sos_core::{Grid, ObservationMode, SosError, SosType, Tick, UnitId};
use sos_env::{Environment, Patient};

use crate::UnitRole;

/// Registry entry describing one registered unit.
///
/// The world keeps a roster of these alongside the units themselves so the
/// `Agents` resource can be read while a unit is being stepped mutably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentInfo {
    pub id:   UnitId,
    pub name: String,
    pub role: UnitRole,
}

/// A read-only snapshot of the simulation state passed to every
/// [`Unit::step`][crate::Unit::step] call.
///
/// `SimContext` is built by the world once per unit step.  All borrows live
/// for the duration of that step; the world never mutates the environment
/// while a context is live.
pub struct SimContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Command-and-control topology in force for this scenario.
    pub sos_type: SosType,

    /// How far rescue units see when they observe.
    pub observation: ObservationMode,

    /// Registry roster, in stepping order.
    pub agents: &'a [AgentInfo],

    /// Patients, occupancy, and the expected-density prior.
    pub env: &'a Environment,
}

impl<'a> SimContext<'a> {
    /// Build a new context for a single unit step.
    #[inline]
    pub fn new(
        tick:        Tick,
        sos_type:    SosType,
        observation: ObservationMode,
        agents:      &'a [AgentInfo],
        env:         &'a Environment,
    ) -> Self {
        Self { tick, sos_type, observation, agents, env }
    }

    /// Look up a shared resource by key.
    pub fn resource(&self, key: ResourceKey) -> Resource<'a> {
        match key {
            ResourceKey::Time                => Resource::Time(self.tick),
            ResourceKey::Type                => Resource::Type(self.sos_type),
            ResourceKey::Agents              => Resource::Agents(self.agents),
            ResourceKey::Patients            => Resource::Patients(self.env.patients()),
            ResourceKey::ExpectedPatientsMap => Resource::ExpectedPatientsMap(self.env.expected_density()),
        }
    }

    /// Look up a shared resource by its string name (`"Time"`, `"Type"`, …).
    ///
    /// Returns `None` for unknown names.
    pub fn resource_named(&self, name: &str) -> Option<Resource<'a>> {
        name.parse::<ResourceKey>().ok().map(|key| self.resource(key))
    }
}

// ── Resource lookup ───────────────────────────────────────────────────────────

/// Names of the shared resources exposed through [`SimContext::resource`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ResourceKey {
    Time,
    Type,
    Agents,
    Patients,
    ExpectedPatientsMap,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 5] = [
        ResourceKey::Time,
        ResourceKey::Type,
        ResourceKey::Agents,
        ResourceKey::Patients,
        ResourceKey::ExpectedPatientsMap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKey::Time                => "Time",
            ResourceKey::Type                => "Type",
            ResourceKey::Agents              => "Agents",
            ResourceKey::Patients            => "Patients",
            ResourceKey::ExpectedPatientsMap => "ExpectedPatientsMap",
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKey {
    type Err = SosError;

    /// Exact, case-sensitive match on the resource name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SosError::Parse(format!("unknown resource {s:?}")))
    }
}

/// A borrowed view of one shared resource.
#[derive(Clone, Copy, Debug)]
pub enum Resource<'a> {
    Time(Tick),
    Type(SosType),
    Agents(&'a [AgentInfo]),
    Patients(&'a [Patient]),
    ExpectedPatientsMap(&'a Grid<u32>),
}
