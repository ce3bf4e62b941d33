//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the analysis domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::AnalysisId;
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;
