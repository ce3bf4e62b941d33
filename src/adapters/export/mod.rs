//! Export adapters - Implementations of the `ReportExporter` port.
//!
//! - `JsonExporter` - Full report as pretty JSON, parseable back
//! - `CsvExporter` - `type,name,weight,rank` rows
//! - `SummaryExporter` - Plain-text executive summary

mod csv_exporter;
mod json_exporter;
mod summary_exporter;

pub use csv_exporter::CsvExporter;
pub use json_exporter::JsonExporter;
pub use summary_exporter::SummaryExporter;

use crate::ports::{ExportFormat, ReportExporter};

/// Returns the exporter for a format.
pub fn exporter_for(format: ExportFormat) -> Box<dyn ReportExporter> {
    match format {
        ExportFormat::Json => Box::new(JsonExporter::new()),
        ExportFormat::Csv => Box::new(CsvExporter::new()),
        ExportFormat::Summary => Box::new(SummaryExporter::new()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exporter_for_matches_format() {
        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Summary] {
            assert_eq!(exporter_for(format).format(), format);
        }
    }
}
