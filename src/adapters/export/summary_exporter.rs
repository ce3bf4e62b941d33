//! Executive summary exporter - short plain-text digest of a report.

use std::fmt::Write;

use crate::domain::ahp::{AnalysisFailure, AnalysisOutcome, AnalysisReport, AnalysisResult};
use crate::ports::{ExportError, ExportFormat, ReportExporter};

/// Entries listed per section.
const TOP_N: usize = 3;

/// Plain-text summary: top criteria and alternatives, totals,
/// consistency and stability.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryExporter;

impl SummaryExporter {
    pub fn new() -> Self {
        Self
    }

    fn write_result(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
        if let Some(best) = result.rankings.detailed.first() {
            writeln!(out, "Recommended alternative: {} (score {})", best.label, best.score)?;
            writeln!(out)?;
        }

        writeln!(out, "Top criteria:")?;
        for entity in result.criteria.detailed.iter().take(TOP_N) {
            writeln!(
                out,
                "  {}. {} - {:.1}% influence",
                entity.rank,
                entity.label,
                entity.weight * 100.0
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Top alternatives:")?;
        for entity in result.rankings.detailed.iter().take(TOP_N) {
            writeln!(out, "  {}. {} - {}", entity.rank, entity.label, entity.score)?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "Totals: {} criteria, {} alternatives",
            result.metadata.criteria_count, result.metadata.alternatives_count
        )?;

        let criteria = &result.consistency.criteria;
        writeln!(
            out,
            "Consistency: criteria CR {:.3} ({}); all matrices acceptable: {}",
            criteria.ratio,
            criteria.tier.label(),
            if result.consistency.all_acceptable() { "yes" } else { "no" }
        )?;

        let sensitivity = &result.sensitivity;
        writeln!(
            out,
            "Stability: {} (average impact {:.1}%)",
            sensitivity.stability.label(),
            sensitivity.average_impact * 100.0
        )?;
        if let Some(most) = &sensitivity.most_sensitive {
            writeln!(
                out,
                "Most sensitive criterion: {} ({}, impact {:.1}%)",
                most.criterion,
                most.direction,
                most.impact * 100.0
            )?;
        }

        if !sensitivity.recommendations.is_empty() {
            writeln!(out)?;
            writeln!(out, "Recommendations:")?;
            for recommendation in &sensitivity.recommendations {
                writeln!(out, "  - {}", recommendation)?;
            }
        }

        if !result.warnings.is_empty() {
            writeln!(out)?;
            writeln!(out, "Warnings:")?;
            for warning in &result.warnings {
                writeln!(out, "  - {}", warning)?;
            }
        }

        Ok(())
    }

    fn write_failure(out: &mut String, failure: &AnalysisFailure) -> std::fmt::Result {
        writeln!(
            out,
            "Analysis failed while {} [{}]: {}",
            failure.failed_in, failure.code, failure.error
        )?;
        for error in &failure.validation_errors {
            writeln!(out, "  - {}", error)?;
        }
        Ok(())
    }
}

impl ReportExporter for SummaryExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Summary
    }

    fn export(&self, report: &AnalysisReport) -> Result<String, ExportError> {
        let mut out = String::new();
        render(&mut out, report).map_err(|e| ExportError::Serialization(e.to_string()))?;
        Ok(out)
    }
}

fn render(out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
    writeln!(out, "AHP EXECUTIVE SUMMARY")?;
    if let Some(goal) = report.outcome.result().and_then(|r| r.metadata.goal.as_deref()) {
        writeln!(out, "Goal: {}", goal)?;
    }
    writeln!(out, "Analysis: {}", report.analysis_id)?;
    writeln!(out, "Generated: {}", report.generated_at)?;
    writeln!(out)?;

    match &report.outcome {
        AnalysisOutcome::Success(result) => SummaryExporter::write_result(out, result),
        AnalysisOutcome::Failure(failure) => SummaryExporter::write_failure(out, failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::export::test_support::{failed_report, sample_report};

    #[test]
    fn summary_names_the_winner() {
        let text = SummaryExporter::new().export(&sample_report()).unwrap();
        assert!(text.starts_with("AHP EXECUTIVE SUMMARY\nGoal: Pick a car\n"));
        assert!(text.contains("Recommended alternative: Sedan (score 0.580)"));
    }

    #[test]
    fn summary_lists_criteria_influence() {
        let text = SummaryExporter::new().export(&sample_report()).unwrap();
        assert!(text.contains("1. Cost - 60.0% influence"));
        assert!(text.contains("2. Comfort - 40.0% influence"));
        assert!(text.contains("Totals: 2 criteria, 2 alternatives"));
        assert!(text.contains("Stability: "));
    }

    #[test]
    fn summary_omits_missing_goal() {
        let mut report = sample_report();
        if let AnalysisOutcome::Success(result) = &mut report.outcome {
            result.metadata.goal = None;
        }
        let text = SummaryExporter::new().export(&report).unwrap();
        assert!(!text.contains("Goal:"));
    }

    #[test]
    fn summary_reports_failures() {
        let text = SummaryExporter::new().export(&failed_report()).unwrap();
        assert!(text.contains("Analysis failed while Validating [STRUCTURAL_MATRIX]"));
        assert!(text.contains("  - criteria matrix: matrix is empty"));
    }
}
