//! Scenario configuration.
//!
//! Typically loaded from a TOML file by the application crate (with the
//! `serde` feature) and passed to the world builder.  Every field of derived
//! state (patient placement, expected density, agent starting state) is a
//! function of this struct alone.

use std::fmt;
use std::str::FromStr;

use crate::{SosError, SosResult, SosType, Tick};

/// How much of the world a rescue unit perceives when it observes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObservationMode {
    /// Only the cell the unit stands on.
    #[default]
    Local,
    /// Every cell of the grid.
    Global,
}

impl ObservationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ObservationMode::Local  => "local",
            ObservationMode::Global => "global",
        }
    }
}

impl fmt::Display for ObservationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObservationMode {
    type Err = SosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local"  => Ok(ObservationMode::Local),
            "global" => Ok(ObservationMode::Global),
            other    => Err(SosError::Parse(format!("unknown observation mode {other:?}"))),
        }
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Top-level scenario configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    /// Grid width (x extent).  Reference scenario: 19.
    pub width: usize,

    /// Grid height (y extent).  Reference scenario: 19.
    pub height: usize,

    /// Number of patients placed at every reset.
    pub patient_count: usize,

    /// Command-and-control topology.
    pub sos_type: SosType,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Total ticks simulated by `World::run` (sos-sim).
    pub total_ticks: u64,

    /// Rescue-unit observation range.
    pub observation: ObservationMode,

    /// Upper bound on rejection-sampling draws for a single patient
    /// placement.  Exhaustion is reported as
    /// [`SosError::PlacementInfeasible`].
    pub max_placement_attempts: u32,

    /// Vitality every patient starts with; bleed lowers it by one per tick.
    pub initial_vitality: u32,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for ScenarioConfig {
    /// The reference scenario: 19×19 grid, 100 patients.
    fn default() -> Self {
        Self {
            width:                  19,
            height:                 19,
            patient_count:          100,
            sos_type:               SosType::default(),
            seed:                   42,
            total_ticks:            100,
            observation:            ObservationMode::default(),
            max_placement_attempts: 10_000,
            initial_vitality:       100,
            output_interval_ticks:  1,
        }
    }
}

impl ScenarioConfig {
    /// The tick at which a full run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations that can never produce a valid world.
    pub fn validate(&self) -> SosResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SosError::Config(format!(
                "grid dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(SosError::Config(
                "max_placement_attempts must be at least 1".into(),
            ));
        }
        if u32::try_from(self.patient_count).is_err() {
            return Err(SosError::Config(format!(
                "patient_count {} exceeds the patient id range",
                self.patient_count
            )));
        }
        Ok(())
    }
}
