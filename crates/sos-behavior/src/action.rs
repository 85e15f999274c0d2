//! Actions a unit can select, and the utility-scored candidate wrapper.

use sos_core::Direction;

use crate::Message;

/// The single thing a unit does in one tick.
///
/// Actions are plain data: the world executes them immediately after the
/// unit's step returns, before the next unit is stepped.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// Nothing to do this tick.
    Noop,
    /// Claim an undiscovered patient at the unit's current cell.
    DiscoverPatient,
    /// Move one cell.  Only ever generated for in-bounds, non-reversing moves.
    Move(Direction),
    /// Route a message through the world.
    SendMessage(Message),
}

impl Action {
    /// Short label for logs and snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Noop            => "noop",
            Action::DiscoverPatient => "discover",
            Action::Move(_)         => "move",
            Action::SendMessage(_)  => "send",
        }
    }
}

/// An action bundled with its benefit and cost.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CandidateAction {
    pub action:  Action,
    pub benefit: i32,
    pub cost:    i32,
}

impl CandidateAction {
    pub fn new(action: Action, benefit: i32, cost: i32) -> Self {
        Self { action, benefit, cost }
    }

    /// `benefit − cost`.  Selection maximises this.
    #[inline]
    pub fn utility(&self) -> i32 {
        self.benefit - self.cost
    }
}
