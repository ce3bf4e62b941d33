//! Domain layer containing the analysis logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `ahp` - Pairwise-comparison analysis: validation, solving, synthesis, sensitivity

pub mod ahp;
pub mod foundation;
