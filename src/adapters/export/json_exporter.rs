//! JSON exporter - lossless rendering of the full report.

use crate::domain::ahp::AnalysisReport;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

/// Pretty-printed JSON. Parsing the output yields an equal report.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    /// Reads back a report produced by [`JsonExporter::export`].
    pub fn parse(content: &str) -> Result<AnalysisReport, ExportError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl ReportExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
