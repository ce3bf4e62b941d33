//! Consistency - Saaty consistency index and ratio for comparison matrices.

use serde::{Deserialize, Serialize};

/// Conventional acceptability threshold for the consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Saaty's Random Index for n = 1..=10.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Growth of RI per dimension beyond the table, taken from its last segment.
const RANDOM_INDEX_SLOPE: f64 = 0.04;

/// How the Random Index is chosen for matrices larger than 10×10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomIndexPolicy {
    /// Use RI[10] = 1.49 for every n > 10.
    #[default]
    Cap,
    /// Continue the last table segment linearly (+0.04 per dimension).
    Extrapolate,
}

impl RandomIndexPolicy {
    /// Returns the Random Index for an n×n matrix.
    pub fn random_index(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        if n <= RANDOM_INDEX.len() {
            return RANDOM_INDEX[n - 1];
        }

        let last = RANDOM_INDEX[RANDOM_INDEX.len() - 1];
        match self {
            RandomIndexPolicy::Cap => last,
            RandomIndexPolicy::Extrapolate => {
                last + RANDOM_INDEX_SLOPE * (n - RANDOM_INDEX.len()) as f64
            }
        }
    }
}

/// Qualitative reading of a consistency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyTier {
    Excellent,
    Acceptable,
    Poor,
}

impl ConsistencyTier {
    /// Classifies a ratio against the acceptability threshold.
    ///
    /// Excellent below the threshold, acceptable below twice the threshold.
    pub fn classify(ratio: f64, threshold: f64) -> Self {
        if ratio < threshold {
            ConsistencyTier::Excellent
        } else if ratio < 2.0 * threshold {
            ConsistencyTier::Acceptable
        } else {
            ConsistencyTier::Poor
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ConsistencyTier::Excellent => "Excellent",
            ConsistencyTier::Acceptable => "Acceptable",
            ConsistencyTier::Poor => "Poor",
        }
    }

    /// Returns a human-readable verdict.
    pub fn message(&self) -> &'static str {
        match self {
            ConsistencyTier::Excellent => "Consistency is excellent",
            ConsistencyTier::Acceptable => "Consistency is acceptable",
            ConsistencyTier::Poor => "Consistency is poor - review the pairwise comparisons",
        }
    }
}

/// Consistency of one comparison matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    /// Principal eigenvalue estimate.
    pub lambda_max: f64,
    /// Consistency Index, `(λmax - n) / (n - 1)`.
    pub index: f64,
    /// Consistency Ratio, `CI / RI[n]`.
    pub ratio: f64,
    pub tier: ConsistencyTier,
    pub is_acceptable: bool,
    pub threshold: f64,
}

impl ConsistencyResult {
    /// Evaluates consistency from λmax for an n×n matrix.
    ///
    /// Below 3×3 the ratio is not applicable: CI and CR are reported as 0.
    /// Floating error can push λmax a hair below n for consistent
    /// matrices, so CI is clamped at 0.
    pub fn evaluate(
        lambda_max: f64,
        n: usize,
        policy: RandomIndexPolicy,
        threshold: f64,
    ) -> Self {
        let (index, ratio) = if n <= 2 {
            (0.0, 0.0)
        } else {
            let index = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);
            (index, index / policy.random_index(n))
        };

        Self {
            lambda_max,
            index,
            ratio,
            tier: ConsistencyTier::classify(ratio, threshold),
            is_acceptable: ratio < threshold,
            threshold,
        }
    }

    /// Returns the verdict message for this result.
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}
