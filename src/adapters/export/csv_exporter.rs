//! CSV exporter - one row per criterion and per alternative.

use crate::domain::ahp::{AnalysisOutcome, AnalysisReport, ScoredEntity};
use crate::ports::{ExportError, ExportFormat, ReportExporter};

const HEADER: &str = "type,name,weight,rank";

/// Criteria rows first, then alternatives, each best first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    fn push_rows(out: &mut String, kind: &str, entities: &[ScoredEntity]) {
        for entity in entities {
            out.push_str(&format!(
                "{},{},{:.6},{}\n",
                kind,
                escape_field(&entity.label),
                entity.weight,
                entity.rank
            ));
        }
    }
}

impl ReportExporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError> {
        let result = match &report.outcome {
            AnalysisOutcome::Success(result) => result,
            AnalysisOutcome::Failure(_) => return Err(ExportError::NoResults(ExportFormat::Csv)),
        };

        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        Self::push_rows(&mut out, "criterion", &result.criteria.detailed);
        Self::push_rows(&mut out, "alternative", &result.rankings.detailed);
        Ok(out)
    }
}

/// Quotes a field when it holds a comma, quote or line break.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::export::test_support::{failed_report, sample_report};

    #[test]
    fn rows_follow_header() {
        let csv = CsvExporter::new().export(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "type,name,weight,rank");
        assert_eq!(lines[1], "criterion,Cost,0.600000,1");
        assert_eq!(lines[2], "criterion,Comfort,0.400000,2");
        assert!(lines[3].starts_with("alternative,"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn awkward_labels_are_quoted() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn failed_runs_have_nothing_to_export() {
        let err = CsvExporter::new().export(&failed_report()).unwrap_err();
        assert_eq!(err, ExportError::NoResults(ExportFormat::Csv));
    }
}
