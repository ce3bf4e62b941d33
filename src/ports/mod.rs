//! Ports - Interfaces between the run handler and its collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and its stage implementations and exporters.
//! Adapters implement these ports.
//!
//! ## Stage Ports
//!
//! - `MatrixChecker` - Structural matrix validation
//! - `PriorityEstimator` - Priority vector and consistency
//! - `ScoreAggregator` - Hierarchical synthesis
//! - `PerturbationAnalyzer` - Sensitivity analysis
//!
//! ## Output Ports
//!
//! - `ReportExporter` - JSON, CSV and summary rendering

mod analysis_stages;
mod report_exporter;

pub use analysis_stages::{MatrixChecker, PerturbationAnalyzer, PriorityEstimator, ScoreAggregator};
pub use report_exporter::{ExportError, ExportFormat, ReportExporter};
