//! RunPhase enum for tracking the progress of one analysis run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Phase of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Validating,
    Solving,
    Synthesizing,
    AnalyzingSensitivity,
    Done,
    Error,
}

impl RunPhase {
    /// Returns true once the run has produced its outcome.
    pub fn is_finished(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Error)
    }
}

impl StateMachine for RunPhase {
    /// Valid transitions:
    /// - Validating -> Solving -> Synthesizing -> AnalyzingSensitivity -> Done
    /// - any unfinished phase -> Error
    fn can_transition_to(&self, target: &Self) -> bool {
        use RunPhase::*;
        matches!(
            (self, target),
            (Validating, Solving)
                | (Solving, Synthesizing)
                | (Synthesizing, AnalyzingSensitivity)
                | (AnalyzingSensitivity, Done)
                | (Validating, Error)
                | (Solving, Error)
                | (Synthesizing, Error)
                | (AnalyzingSensitivity, Error)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RunPhase::*;
        match self {
            Validating => vec![Solving, Error],
            Solving => vec![Synthesizing, Error],
            Synthesizing => vec![AnalyzingSensitivity, Error],
            AnalyzingSensitivity => vec![Done, Error],
            Done | Error => vec![],
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunPhase::Validating => "Validating",
            RunPhase::Solving => "Solving",
            RunPhase::Synthesizing => "Synthesizing",
            RunPhase::AnalyzingSensitivity => "AnalyzingSensitivity",
            RunPhase::Done => "Done",
            RunPhase::Error => "Error",
        };
        write!(f, "{}", s)
    }
}
