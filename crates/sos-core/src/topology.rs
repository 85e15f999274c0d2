//! System-of-Systems topology types and their behaviour toggles.
//!
//! Rather than scattering `match sos_type` arms through unit behaviour, each
//! topology maps to a row of [`TopologyRules`] and behaviour code asks the
//! row (`ctx.sos_type.rules().requires_acknowledgement`).

use std::fmt;
use std::str::FromStr;

use crate::SosError;

/// Command-and-control topology of the rescue System-of-Systems.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SosType {
    /// A central coordinator directs every unit; units do not self-direct.
    Directed,
    /// Units act autonomously but acknowledge coordinator requests.
    Acknowledged,
    /// Units act autonomously and answer nobody.
    #[default]
    Collaborative,
}

/// Behaviour toggles selected by topology.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TopologyRules {
    /// Units answer coordinator information requests with a `Response`.
    pub requires_acknowledgement: bool,
    /// Units generate their own movement candidates in the normal phase.
    pub autonomous_movement: bool,
}

/// Indexed by `SosType as usize`.
const RULES: [TopologyRules; 3] = [
    // Directed
    TopologyRules { requires_acknowledgement: true,  autonomous_movement: false },
    // Acknowledged
    TopologyRules { requires_acknowledgement: true,  autonomous_movement: true },
    // Collaborative
    TopologyRules { requires_acknowledgement: false, autonomous_movement: true },
];

impl SosType {
    pub const ALL: [SosType; 3] = [SosType::Directed, SosType::Acknowledged, SosType::Collaborative];

    /// The behaviour toggles for this topology.
    #[inline]
    pub fn rules(self) -> &'static TopologyRules {
        &RULES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SosType::Directed      => "directed",
            SosType::Acknowledged  => "acknowledged",
            SosType::Collaborative => "collaborative",
        }
    }
}

impl fmt::Display for SosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SosType {
    type Err = SosError;

    /// Case-insensitive; accepts the labels produced by [`SosType::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SosType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SosError::Parse(format!("unknown SoS type {s:?}")))
    }
}
