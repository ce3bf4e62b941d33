//! Adapters - Implementations of port interfaces.
//!
//! - `engine` - Default analysis stages backed by the domain services
//! - `export` - JSON, CSV and executive-summary report exporters

pub mod engine;
pub mod export;

pub use engine::{
    StandardMatrixChecker, StandardPerturbationAnalyzer, StandardPriorityEstimator,
    StandardScoreAggregator,
};
pub use export::{exporter_for, CsvExporter, JsonExporter, SummaryExporter};
