//! The three-phase decision engine shared by every unit role.

use std::fmt;

use sos_core::SimRng;

use crate::{Action, CandidateAction, Message};

/// Which action-generation rule applies on a step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Phase {
    /// The unit may volunteer outbound actions (discover, share, request).
    #[default]
    ActiveImmediate,
    /// The unit reacts to queued requests.
    PassiveImmediate,
    /// The unit performs autonomous task actions (movement).
    Normal,
}

impl Phase {
    /// The phase scheduled after this one.
    #[inline]
    pub fn next(self) -> Phase {
        match self {
            Phase::ActiveImmediate  => Phase::PassiveImmediate,
            Phase::PassiveImmediate => Phase::Normal,
            Phase::Normal           => Phase::ActiveImmediate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::ActiveImmediate  => "active",
            Phase::PassiveImmediate => "passive",
            Phase::Normal           => "normal",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase state, inbound queues, and candidate lists for one unit.
///
/// Role-specific behaviour fills the candidate lists; `DecisionCore` owns
/// the parts of the protocol every role shares: queue classification, the
/// phase override, the phase cycle, and utility-based selection.
#[derive(Clone, Debug, Default)]
pub struct DecisionCore {
    phase:        Phase,
    acting_phase: Option<Phase>,
    requests:     Vec<Message>,
    information:  Vec<Message>,
    immediate:    Vec<CandidateAction>,
    normal:       Vec<CandidateAction>,
}

impl DecisionCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to `ActiveImmediate` with empty queues and lists.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The phase the next step will start from (before the override).
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The phase whose candidates were generated on the most recent step.
    /// `None` before the first step.
    #[inline]
    pub fn acting_phase(&self) -> Option<Phase> {
        self.acting_phase
    }

    // ── Messaging ─────────────────────────────────────────────────────────

    /// Queue an inbound message: requests drive the passive phase,
    /// responses and informs are consumed during belief update.
    pub fn receive(&mut self, message: Message) {
        if message.purpose.is_request() {
            self.requests.push(message);
        } else {
            self.information.push(message);
        }
    }

    #[inline]
    pub fn requests(&self) -> &[Message] {
        &self.requests
    }

    #[inline]
    pub fn information(&self) -> &[Message] {
        &self.information
    }

    /// Drain the request queue.
    pub fn take_requests(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.requests)
    }

    /// Drain the information queue.
    pub fn take_information(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.information)
    }

    // ── Phase machine ─────────────────────────────────────────────────────

    /// Pending requests pre-empt normal behaviour; an idle passive phase
    /// falls through to normal instead of stalling.
    pub fn apply_phase_override(&mut self) {
        match self.phase {
            Phase::PassiveImmediate if self.requests.is_empty() => self.phase = Phase::Normal,
            Phase::Normal if !self.requests.is_empty() => self.phase = Phase::PassiveImmediate,
            _ => {}
        }
    }

    /// Clear both candidate lists, advance the phase for the next tick, and
    /// return the phase whose candidates should be generated now.
    pub fn begin_generation(&mut self) -> Phase {
        self.immediate.clear();
        self.normal.clear();
        let current = self.phase;
        self.acting_phase = Some(current);
        self.phase = current.next();
        current
    }

    // ── Candidates ────────────────────────────────────────────────────────

    pub fn push_immediate(&mut self, candidate: CandidateAction) {
        self.immediate.push(candidate);
    }

    pub fn push_normal(&mut self, candidate: CandidateAction) {
        self.normal.push(candidate);
    }

    #[inline]
    pub fn immediate(&self) -> &[CandidateAction] {
        &self.immediate
    }

    #[inline]
    pub fn normal(&self) -> &[CandidateAction] {
        &self.normal
    }

    /// Pick exactly one action.
    ///
    /// A non-empty immediate list wins outright, whatever the utilities on
    /// the normal list.  The chosen list is shuffled with the shared stream
    /// and stable-sorted by descending utility, so ties break uniformly but
    /// reproducibly; the head is removed and returned.  With both lists
    /// empty the result is [`Action::Noop`] and no randomness is consumed.
    pub fn select(&mut self, rng: &mut SimRng) -> Action {
        let list = if !self.immediate.is_empty() {
            &mut self.immediate
        } else if !self.normal.is_empty() {
            &mut self.normal
        } else {
            return Action::Noop;
        };

        rng.shuffle(list);
        list.sort_by(|a, b| b.utility().cmp(&a.utility()));
        list.remove(0).action
    }
}
