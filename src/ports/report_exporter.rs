//! Report Exporter Port - Serialization of analysis reports.
//!
//! This port defines the contract for turning an `AnalysisReport` into a
//! document the caller can print or save. Adapters (JSON, CSV and an
//! executive summary) provide the implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ahp::AnalysisReport;

/// Port for exporting analysis reports.
///
/// # Contract
///
/// Implementations must:
/// - Be pure functions of the report
/// - Derive every figure from the report, never recompute it
///
/// # Usage
///
/// ```rust,ignore
/// let exporter: &dyn ReportExporter = get_exporter(ExportFormat::Csv);
/// let csv = exporter.export(&report)?;
/// ```
pub trait ReportExporter: Send + Sync {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Render the report.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the report cannot be rendered in this format.
    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError>;
}

/// Export formats supported by the exporters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Full report, lossless.
    #[default]
    Json,
    /// Criteria and alternative rows with weight and rank.
    Csv,
    /// Plain-text executive summary.
    Summary,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Summary => "text/plain; charset=utf-8",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Summary => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Summary => write!(f, "summary"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "summary" | "txt" | "text" => Ok(ExportFormat::Summary),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during report export.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The report holds a failed run and the format needs results.
    #[error("Nothing to export as {0}: the analysis failed")]
    NoResults(ExportFormat),

    /// Serializer failure.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Summary);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = "pdf".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err, ExportError::UnsupportedFormat("pdf".to_string()));
    }

    #[test]
    fn format_metadata_is_consistent() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Summary.to_string(), "summary");
        assert!(ExportFormat::Json.content_type().contains("json"));
    }
}
