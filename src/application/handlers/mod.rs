//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    AnalysisInput, ComparisonValue, InputError, Judgment, MatrixInput, RunAnalysisCommand,
    RunAnalysisHandler,
};
