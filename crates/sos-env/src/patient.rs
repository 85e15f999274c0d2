//! Casualties.

use std::fmt;

use sos_core::{Location, PatientId};

/// Discovery state of a patient.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatientStatus {
    /// Not yet found by any rescue unit.
    #[default]
    Initial,
    /// Claimed by a rescue unit.  Never reverts within a run.
    Discovered,
}

impl PatientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Initial    => "initial",
            PatientStatus::Discovered => "discovered",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A casualty on the grid.
///
/// Fields are private: location and status only change through
/// [`Environment`][crate::Environment], which keeps the occupancy grid in
/// step with `location`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    id:       PatientId,
    name:     String,
    location: Location,
    status:   PatientStatus,
    vitality: u32,
}

impl Patient {
    pub(crate) fn new(id: PatientId, vitality: u32) -> Self {
        Self {
            id,
            name: format!("Patient{}", id.0 + 1),
            location: Location::default(),
            status: PatientStatus::Initial,
            vitality,
        }
    }

    #[inline]
    pub fn id(&self) -> PatientId {
        self.id
    }

    /// Display name, `Patient1`..`PatientN`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn status(&self) -> PatientStatus {
        self.status
    }

    #[inline]
    pub fn is_discovered(&self) -> bool {
        self.status == PatientStatus::Discovered
    }

    /// Remaining vitality; lowered by one per bleed, floored at zero.
    #[inline]
    pub fn vitality(&self) -> u32 {
        self.vitality
    }

    pub(crate) fn reset(&mut self, vitality: u32) {
        self.status = PatientStatus::Initial;
        self.vitality = vitality;
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Transition `Initial → Discovered`.  Returns `false` if already
    /// discovered.
    pub(crate) fn discover(&mut self) -> bool {
        if self.is_discovered() {
            return false;
        }
        self.status = PatientStatus::Discovered;
        true
    }

    pub(crate) fn bleed(&mut self) {
        self.vitality = self.vitality.saturating_sub(1);
    }
}
