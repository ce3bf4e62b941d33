//! Synthesis Engine - weighted combination of local priorities into scores.

use serde::{Deserialize, Serialize};

use super::errors::AhpError;
use super::PriorityVector;

/// Scores closer than this are ranked by input order.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Aggregate scores and ranking of the alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// `score[a] = Σ_c criteria[c] × local[c][a]`.
    pub alternative_scores: Vec<f64>,
    /// Alternative indices, best first.
    pub ranked_indices: Vec<usize>,
    /// `contributions[a][c] = criteria[c] × local[c][a]`.
    pub contributions: Vec<Vec<f64>>,
}

impl SynthesisResult {
    /// 1-based rank of each alternative, indexed by alternative.
    pub fn ranks(&self) -> Vec<usize> {
        let mut ranks = vec![0; self.ranked_indices.len()];
        for (position, &alternative) in self.ranked_indices.iter().enumerate() {
            ranks[alternative] = position + 1;
        }
        ranks
    }

    /// Index of the best alternative, if any.
    pub fn best(&self) -> Option<usize> {
        self.ranked_indices.first().copied()
    }

    pub fn total(&self) -> f64 {
        self.alternative_scores.iter().sum()
    }
}

/// Hierarchical synthesis over one level of criteria.
pub struct SynthesisEngine;

impl SynthesisEngine {
    /// Combines criteria weights with per-criterion alternative weights.
    ///
    /// # Errors
    /// `AhpError::InputCardinality` when the number of local vectors differs
    /// from the number of criteria, or when local vectors differ in length.
    ///
    /// # Invariant
    /// Σ scores equals Σ criteria weights within floating tolerance.
    pub fn synthesize(
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
    ) -> Result<SynthesisResult, AhpError> {
        if alternative_weights.len() != criteria_weights.len() {
            return Err(AhpError::cardinality(
                "alternative priority vectors (one per criterion)",
                criteria_weights.len(),
                alternative_weights.len(),
            ));
        }

        let alternatives = alternative_weights.first().map_or(0, PriorityVector::len);
        if let Some(bad) = alternative_weights.iter().find(|v| v.len() != alternatives) {
            return Err(AhpError::cardinality(
                "alternatives in priority vector",
                alternatives,
                bad.len(),
            ));
        }

        let contributions: Vec<Vec<f64>> = (0..alternatives)
            .map(|a| {
                criteria_weights
                    .weights()
                    .iter()
                    .zip(alternative_weights)
                    .map(|(wc, local)| wc * local.weights()[a])
                    .collect()
            })
            .collect();

        let alternative_scores: Vec<f64> = contributions
            .iter()
            .map(|row| row.iter().sum())
            .collect();

        let ranked_indices = rank_descending(&alternative_scores);

        Ok(SynthesisResult {
            alternative_scores,
            ranked_indices,
            contributions,
        })
    }
}

/// Orders indices by descending score.
///
/// Repeatedly takes the highest remaining score and, among the remaining
/// indices within [`TIE_TOLERANCE`] of it, the one that came first.
pub fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..scores.len()).collect();
    let mut ranked = Vec::with_capacity(scores.len());

    while !remaining.is_empty() {
        let top = remaining
            .iter()
            .map(|&i| scores[i])
            .fold(f64::NEG_INFINITY, f64::max);
        let position = remaining
            .iter()
            .position(|&i| (top - scores[i]).abs() <= TIE_TOLERANCE)
            .unwrap_or(0);
        ranked.push(remaining.remove(position));
    }

    ranked
}
