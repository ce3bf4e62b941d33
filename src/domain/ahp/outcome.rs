//! Analysis outcome - the tagged result object handed to callers and exporters.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisId, ErrorCode, Timestamp};

use super::consistency::ConsistencyResult;
use super::run_phase::RunPhase;
use super::sensitivity::SensitivityReport;
use super::synthesis::rank_descending;

/// A labelled entity with its weight and rank, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    pub index: usize,
    pub label: String,
    pub weight: f64,
    /// Weight rounded to three decimals.
    pub score: String,
    /// 1-based, 1 is best.
    pub rank: usize,
}

impl ScoredEntity {
    /// Builds the display list, best first.
    ///
    /// Labels and weights are paired by index; extra entries on either
    /// side are ignored.
    pub fn ranked(labels: &[String], weights: &[f64]) -> Vec<ScoredEntity> {
        let n = labels.len().min(weights.len());
        rank_descending(&weights[..n])
            .into_iter()
            .enumerate()
            .map(|(position, index)| ScoredEntity {
                index,
                label: labels[index].clone(),
                weight: weights[index],
                score: format!("{:.3}", weights[index]),
                rank: position + 1,
            })
            .collect()
    }
}

/// Criteria weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSection {
    pub labels: Vec<String>,
    pub weights: Vec<f64>,
    pub detailed: Vec<ScoredEntity>,
}

/// Synthesized alternative scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsSection {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
    pub detailed: Vec<ScoredEntity>,
    pub ranked_indices: Vec<usize>,
    /// `contributions[a][c]`: share of alternative `a`'s score coming from criterion `c`.
    pub contributions: Vec<Vec<f64>>,
}

/// Priority vectors exactly as solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityVectors {
    pub criteria: Vec<f64>,
    /// One vector per criterion, indexed like the criteria.
    pub alternatives: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionConsistency {
    pub criterion_index: usize,
    pub criterion: String,
    pub consistency: ConsistencyResult,
}

/// Consistency of every matrix in the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencySection {
    pub criteria: ConsistencyResult,
    pub per_criterion: Vec<CriterionConsistency>,
}

impl ConsistencySection {
    /// True when every matrix is below its acceptability threshold.
    pub fn all_acceptable(&self) -> bool {
        self.criteria.is_acceptable && self.per_criterion.iter().all(|c| c.consistency.is_acceptable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Decision goal the run was asked to answer, if one was given.
    #[serde(default)]
    pub goal: Option<String>,
    pub criteria_count: usize,
    pub alternatives_count: usize,
    pub criteria_consistency_ratio: f64,
}

/// Everything a successful run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub criteria: CriteriaSection,
    pub rankings: RankingsSection,
    pub priority_vectors: PriorityVectors,
    pub consistency: ConsistencySection,
    pub sensitivity: SensitivityReport,
    /// Non-fatal notes: input size advice and out-of-scale judgments.
    pub warnings: Vec<String>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Label of the top-ranked alternative.
    pub fn best_alternative(&self) -> Option<&str> {
        self.rankings.detailed.first().map(|e| e.label.as_str())
    }
}

/// Why and where a run stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    /// Phase the run was in when it failed.
    pub failed_in: RunPhase,
    pub code: ErrorCode,
    pub error: String,
    /// Every problem collected during validation; empty for solver failures.
    pub validation_errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Result of one run: either the full payload or the collected errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    Failure(AnalysisFailure),
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Success(result) => Some(result),
            AnalysisOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&AnalysisFailure> {
        match self {
            AnalysisOutcome::Success(_) => None,
            AnalysisOutcome::Failure(failure) => Some(failure),
        }
    }

    /// Final phase of the run.
    pub fn phase(&self) -> RunPhase {
        match self {
            AnalysisOutcome::Success(_) => RunPhase::Done,
            AnalysisOutcome::Failure(_) => RunPhase::Error,
        }
    }
}

/// An outcome stamped for export.
///
/// Identity and time live here rather than in the outcome so that
/// repeated runs over the same input compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub generated_at: Timestamp,
    pub outcome: AnalysisOutcome,
}

impl AnalysisReport {
    pub fn new(outcome: AnalysisOutcome) -> Self {
        Self {
            analysis_id: AnalysisId::new(),
            generated_at: Timestamp::now(),
            outcome,
        }
    }
}
