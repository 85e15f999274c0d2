//! Fixed facilities (hospitals).

use sos_core::Location;

use crate::DecisionCore;

/// A registered entity with a fixed location.
///
/// Facilities take part in the step protocol and in message routing (they
/// report a location, so location-filtered messages can reach them), but
/// generate no candidates: every step selects `Noop`.  Their cells are
/// excluded from patient placement.
#[derive(Clone, Debug)]
pub struct Facility {
    name:            String,
    location:        Location,
    pub(crate) core: DecisionCore,
}

impl Facility {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self { name: name.into(), location, core: DecisionCore::new() }
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
    pub fn core(&self) -> &DecisionCore {
        &self.core
    }

    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Facilities do not react to messages yet; drop whatever arrived so the
    /// queues stay bounded.
    pub(crate) fn consume_information(&mut self) {
        self.core.take_information();
    }

    pub(crate) fn generate_passive_actions(&mut self) {
        self.core.take_requests();
    }
}
