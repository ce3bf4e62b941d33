//! Sensitivity Analyzer - ranking stability under criterion weight perturbation.
//!
//! Each criterion weight is scaled up and down by a relative step, the other
//! weights are rescaled proportionally so the vector still sums to 1, and the
//! alternatives are resynthesized. Impact is the L1 displacement of the score
//! vector relative to the baseline total.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::errors::AhpError;
use super::synthesis::{SynthesisEngine, SynthesisResult};
use super::PriorityVector;

/// Default relative perturbation (±10%).
pub const DEFAULT_PERTURBATION_STEP: f64 = 0.10;

/// Records with impact above this produce a recommendation.
pub const DEFAULT_RECOMMENDATION_THRESHOLD: f64 = 0.15;

/// Below this, the remaining criteria are considered weightless.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Sign of a perturbation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerturbationDirection {
    Increase,
    Decrease,
}

impl PerturbationDirection {
    pub const BOTH: [PerturbationDirection; 2] =
        [PerturbationDirection::Increase, PerturbationDirection::Decrease];

    pub fn sign(&self) -> f64 {
        match self {
            PerturbationDirection::Increase => 1.0,
            PerturbationDirection::Decrease => -1.0,
        }
    }
}

impl fmt::Display for PerturbationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerturbationDirection::Increase => write!(f, "increase"),
            PerturbationDirection::Decrease => write!(f, "decrease"),
        }
    }
}

/// How far the ranking moves under perturbation, as a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    High,
    Medium,
    Low,
}

impl Stability {
    /// High below 0.10 average impact, medium below 0.20, low otherwise.
    pub fn classify(average_impact: f64) -> Self {
        if average_impact < 0.10 {
            Stability::High
        } else if average_impact < 0.20 {
            Stability::Medium
        } else {
            Stability::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stability::High => "High",
            Stability::Medium => "Medium",
            Stability::Low => "Low",
        }
    }
}

/// Movement of one alternative between baseline and perturbed ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankShift {
    pub alternative_index: usize,
    pub original_rank: usize,
    pub perturbed_rank: usize,
    pub score_change: f64,
}

/// Effect of one criterion/direction perturbation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRecord {
    pub criterion_index: usize,
    pub criterion: String,
    pub direction: PerturbationDirection,
    /// Signed relative change applied to the criterion weight, in percent.
    pub change_percent: f64,
    pub original_weight: f64,
    pub perturbed_weight: f64,
    /// Full re-normalized criteria weight vector.
    pub perturbed_weights: Vec<f64>,
    pub perturbed_scores: Vec<f64>,
    pub perturbed_ranking: Vec<usize>,
    pub ranking_changes: Vec<RankShift>,
    pub ranking_changed: bool,
    /// `Σ|perturbed - original| / Σ original`.
    pub impact: f64,
}

impl SensitivityRecord {
    /// Label such as `+10%` or `-10%`.
    pub fn change_label(&self) -> String {
        format!("{:+.0}%", self.change_percent)
    }
}

/// The criterion/direction pair with the largest impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostSensitive {
    pub criterion_index: usize,
    pub criterion: String,
    pub direction: PerturbationDirection,
    pub impact: f64,
}

/// A criterion whose records could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityGap {
    pub criterion_index: usize,
    pub criterion: String,
    pub reason: String,
}

/// Sensitivity of the synthesized ranking to criterion weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub step: f64,
    pub records: Vec<SensitivityRecord>,
    pub most_sensitive: Option<MostSensitive>,
    pub average_impact: f64,
    pub stability: Stability,
    pub recommendations: Vec<String>,
    pub gaps: Vec<SensitivityGap>,
}

/// Sensitivity analysis configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySettings {
    pub step: f64,
    pub recommendation_threshold: f64,
}

impl Default for SensitivitySettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_PERTURBATION_STEP,
            recommendation_threshold: DEFAULT_RECOMMENDATION_THRESHOLD,
        }
    }
}

/// One-at-a-time weight perturbation analysis.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Analyzes every criterion in both directions.
    ///
    /// A criterion whose remaining weights cannot be rescaled
    /// (`DegenerateWeights`) is skipped and listed in `gaps`; the rest of
    /// the report is still produced.
    ///
    /// # Errors
    /// - `AhpError::InvalidStep` unless `0 < step < 1`
    /// - `AhpError::InputCardinality` when labels, weights and local vectors disagree
    pub fn analyze(
        criteria: &[String],
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
        settings: &SensitivitySettings,
    ) -> Result<SensitivityReport, AhpError> {
        let step = settings.step;
        if !(step > 0.0 && step < 1.0) {
            return Err(AhpError::InvalidStep { step });
        }
        if criteria.len() != criteria_weights.len() {
            return Err(AhpError::cardinality(
                "criteria labels",
                criteria_weights.len(),
                criteria.len(),
            ));
        }

        let baseline = SynthesisEngine::synthesize(criteria_weights, alternative_weights)?;

        let mut records = Vec::new();
        let mut gaps = Vec::new();

        for (k, label) in criteria.iter().enumerate() {
            match Self::perturb_both(k, label, criteria_weights, alternative_weights, &baseline, step)
            {
                Ok(pair) => records.extend(pair),
                Err(err @ AhpError::DegenerateWeights { .. }) => {
                    warn!(criterion = %label, "Skipping sensitivity record: {}", err);
                    gaps.push(SensitivityGap {
                        criterion_index: k,
                        criterion: label.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Self::summarize(step, records, gaps, settings.recommendation_threshold))
    }

    /// Scales weight `k` by `1 ± step` (capped at 1) and rescales the others
    /// proportionally so the vector sums to 1.
    ///
    /// # Errors
    /// - `AhpError::InputCardinality` when `k` is not an index of `weights`
    /// - `AhpError::DegenerateWeights` when the other weights sum to zero
    pub fn perturb(
        weights: &PriorityVector,
        k: usize,
        direction: PerturbationDirection,
        step: f64,
    ) -> Result<PriorityVector, AhpError> {
        let original = weights.weights();
        let Some(&current) = original.get(k) else {
            return Err(AhpError::cardinality(
                format!("criterion index {} within weights", k),
                original.len(),
                k.saturating_add(1),
            ));
        };
        let others: f64 = original
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != k)
            .map(|(_, w)| w)
            .sum();

        if others < DEGENERATE_EPSILON {
            return Err(AhpError::DegenerateWeights { criterion_index: k });
        }

        let new_k = (current * (1.0 + direction.sign() * step)).clamp(0.0, 1.0);
        let scale = (1.0 - new_k) / others;

        Ok(PriorityVector::new(
            original
                .iter()
                .enumerate()
                .map(|(j, w)| if j == k { new_k } else { w * scale })
                .collect(),
        ))
    }

    fn perturb_both(
        k: usize,
        label: &str,
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
        baseline: &SynthesisResult,
        step: f64,
    ) -> Result<Vec<SensitivityRecord>, AhpError> {
        PerturbationDirection::BOTH
            .iter()
            .map(|&direction| {
                let perturbed = Self::perturb(criteria_weights, k, direction, step)?;
                let result = SynthesisEngine::synthesize(&perturbed, alternative_weights)?;
                Ok(Self::record(k, label, direction, step, criteria_weights, perturbed, baseline, result))
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        k: usize,
        label: &str,
        direction: PerturbationDirection,
        step: f64,
        criteria_weights: &PriorityVector,
        perturbed: PriorityVector,
        baseline: &SynthesisResult,
        result: SynthesisResult,
    ) -> SensitivityRecord {
        let original_ranks = baseline.ranks();
        let perturbed_ranks = result.ranks();

        let ranking_changes: Vec<RankShift> = (0..baseline.alternative_scores.len())
            .map(|a| RankShift {
                alternative_index: a,
                original_rank: original_ranks[a],
                perturbed_rank: perturbed_ranks[a],
                score_change: result.alternative_scores[a] - baseline.alternative_scores[a],
            })
            .collect();

        SensitivityRecord {
            criterion_index: k,
            criterion: label.to_string(),
            direction,
            change_percent: direction.sign() * step * 100.0,
            original_weight: criteria_weights.weights()[k],
            perturbed_weight: perturbed.weights()[k],
            perturbed_weights: perturbed.into_inner(),
            impact: impact(&baseline.alternative_scores, &result.alternative_scores),
            ranking_changed: result.ranked_indices != baseline.ranked_indices,
            perturbed_scores: result.alternative_scores,
            perturbed_ranking: result.ranked_indices,
            ranking_changes,
        }
    }

    fn summarize(
        step: f64,
        records: Vec<SensitivityRecord>,
        gaps: Vec<SensitivityGap>,
        recommendation_threshold: f64,
    ) -> SensitivityReport {
        let average_impact = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.impact).sum::<f64>() / records.len() as f64
        };

        let most_sensitive = records
            .iter()
            .fold(None::<&SensitivityRecord>, |best, r| match best {
                Some(b) if b.impact >= r.impact => Some(b),
                _ => Some(r),
            })
            .map(|r| MostSensitive {
                criterion_index: r.criterion_index,
                criterion: r.criterion.clone(),
                direction: r.direction,
                impact: r.impact,
            });

        let recommendations = records
            .iter()
            .filter(|r| r.impact > recommendation_threshold)
            .map(|r| {
                format!(
                    "Review the comparisons for '{}' ({} weight): impact {:.1}%",
                    r.criterion,
                    r.change_label(),
                    r.impact * 100.0
                )
            })
            .collect();

        SensitivityReport {
            step,
            most_sensitive,
            average_impact,
            stability: Stability::classify(average_impact),
            recommendations,
            gaps,
            records,
        }
    }
}

/// L1 displacement of `perturbed` from `original`, relative to Σ original.
pub fn impact(original: &[f64], perturbed: &[f64]) -> f64 {
    let total: f64 = original.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let displacement: f64 = original
        .iter()
        .zip(perturbed)
        .map(|(o, p)| (p - o).abs())
        .sum();
    displacement / total
}
