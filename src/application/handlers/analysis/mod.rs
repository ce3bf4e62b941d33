//! Analysis handlers.
//!
//! The command handler that runs an AHP analysis end to end, and the JSON
//! input document it is usually built from.

mod analysis_input;
mod run_analysis;

pub use analysis_input::{AnalysisInput, ComparisonValue, InputError, Judgment, MatrixInput};
pub use run_analysis::{RunAnalysisCommand, RunAnalysisHandler};
