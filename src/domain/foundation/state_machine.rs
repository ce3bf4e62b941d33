//! State machine trait for lifecycle enums.
//!
//! Gives lifecycle enums (such as the analysis run phase) one way to declare
//! their legal transitions and to perform checked moves between states.

use std::fmt;
use thiserror::Error;

/// Raised when a state machine is asked to make an illegal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot transition from {from:?} to {to:?}")]
pub struct InvalidTransition<S: fmt::Debug> {
    pub from: S,
    pub to: S,
}

/// Trait for enums that represent state machines.
///
/// Implementors list their legal transitions and get checked
/// transition methods for free.
///
/// ```ignore
/// let next = RunPhase::Validating.transition_to(RunPhase::Solving)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, InvalidTransition<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(InvalidTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
