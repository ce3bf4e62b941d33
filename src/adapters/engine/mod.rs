//! Engine adapters - Default implementations of the analysis stage ports.
//!
//! - `StandardMatrixChecker` - `MatrixValidator` with configured rules
//! - `StandardPriorityEstimator` - `PrioritySolver` with configured method and RI policy
//! - `StandardScoreAggregator` - `SynthesisEngine`
//! - `StandardPerturbationAnalyzer` - `SensitivityAnalyzer` with configured step

mod standard_stages;

pub use standard_stages::{
    StandardMatrixChecker, StandardPerturbationAnalyzer, StandardPriorityEstimator,
    StandardScoreAggregator,
};
