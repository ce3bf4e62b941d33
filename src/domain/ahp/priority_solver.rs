//! Priority Vector Solver - principal eigenvector and consistency of a matrix.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::consistency::{ConsistencyResult, RandomIndexPolicy, DEFAULT_CONSISTENCY_THRESHOLD};
use super::errors::{MatrixFault, StructuralIssue};
use super::ComparisonMatrix;

const POWER_ITERATION_TOLERANCE: f64 = 1e-12;
const POWER_ITERATION_MAX_STEPS: usize = 1000;

/// An ordered, normalized weight vector; one weight per entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityVector(Vec<f64>);

impl PriorityVector {
    /// Wraps weights as given. Callers are responsible for normalization.
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    /// Scales weights so they sum to 1. A zero-sum input is returned unchanged.
    pub fn normalized(weights: Vec<f64>) -> Self {
        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            return Self(weights);
        }
        Self(weights.into_iter().map(|w| w / total).collect())
    }

    /// The n-entity vector with equal weights.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    pub fn weights(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for PriorityVector {
    fn from(weights: Vec<f64>) -> Self {
        Self::new(weights)
    }
}

/// Eigenvector approximation used by the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityMethod {
    /// Normalized geometric mean of rows. Deterministic, no convergence concerns.
    #[default]
    GeometricMean,
    /// Power iteration on the matrix until successive vectors agree.
    PowerIteration,
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub method: PriorityMethod,
    pub random_index_policy: RandomIndexPolicy,
    pub consistency_threshold: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            method: PriorityMethod::default(),
            random_index_policy: RandomIndexPolicy::default(),
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
        }
    }
}

/// Weights and consistency derived from one comparison matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAnalysis {
    pub weights: PriorityVector,
    pub consistency: ConsistencyResult,
}

impl PriorityAnalysis {
    pub fn consistency_ratio(&self) -> f64 {
        self.consistency.ratio
    }
}

/// Derivation of priority vectors from comparison matrices.
pub struct PrioritySolver;

impl PrioritySolver {
    /// Solves a comparison matrix.
    ///
    /// # Algorithm
    /// 1. principal eigenvector `w` (geometric mean of rows or power iteration),
    ///    normalized so Σw = 1
    /// 2. `λmax = mean((A·w)_i / w_i)`
    /// 3. `CI = (λmax - n) / (n - 1)`, 0 for n ≤ 2
    /// 4. `CR = CI / RI[n]`
    ///
    /// # Errors
    /// - `MatrixFault::Structural` for an empty or non-square matrix
    /// - `MatrixFault::InvalidEntry` for the first non-positive or non-finite entry
    pub fn solve(
        matrix: &ComparisonMatrix,
        settings: &SolverSettings,
    ) -> Result<PriorityAnalysis, MatrixFault> {
        Self::check_solvable(matrix)?;

        let rows = matrix.rows();
        let n = rows.len();

        let weights = match settings.method {
            PriorityMethod::GeometricMean => Self::geometric_mean(rows),
            PriorityMethod::PowerIteration => Self::power_iteration(rows),
        };

        let lambda_max = Self::lambda_max(rows, weights.weights());
        let consistency = ConsistencyResult::evaluate(
            lambda_max,
            n,
            settings.random_index_policy,
            settings.consistency_threshold,
        );

        debug!(
            n,
            method = ?settings.method,
            lambda_max,
            consistency_ratio = consistency.ratio,
            "Solved comparison matrix"
        );

        Ok(PriorityAnalysis {
            weights,
            consistency,
        })
    }

    fn check_solvable(matrix: &ComparisonMatrix) -> Result<(), MatrixFault> {
        if matrix.is_empty() {
            return Err(MatrixFault::Structural(StructuralIssue::Empty));
        }

        let n = matrix.size();
        for (row, values) in matrix.rows().iter().enumerate() {
            if values.len() != n {
                return Err(MatrixFault::Structural(StructuralIssue::NotSquare {
                    row,
                    length: values.len(),
                    expected: n,
                }));
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(MatrixFault::InvalidEntry { row, col, value });
                }
            }
        }

        Ok(())
    }

    /// `w_i = (Π_j m[i][j])^(1/n)`, computed in log space to avoid overflow.
    fn geometric_mean(rows: &[Vec<f64>]) -> PriorityVector {
        let n = rows.len() as f64;
        let raw = rows
            .iter()
            .map(|row| (row.iter().map(|v| v.ln()).sum::<f64>() / n).exp())
            .collect();
        PriorityVector::normalized(raw)
    }

    fn power_iteration(rows: &[Vec<f64>]) -> PriorityVector {
        let n = rows.len();
        let mut current = vec![1.0 / n as f64; n];

        for step in 0..POWER_ITERATION_MAX_STEPS {
            let next = PriorityVector::normalized(multiply(rows, &current)).into_inner();
            let delta = next
                .iter()
                .zip(&current)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            current = next;

            if delta < POWER_ITERATION_TOLERANCE {
                debug!(steps = step + 1, "Power iteration converged");
                return PriorityVector::new(current);
            }
        }

        debug!(
            steps = POWER_ITERATION_MAX_STEPS,
            "Power iteration stopped at step limit"
        );
        PriorityVector::new(current)
    }

    fn lambda_max(rows: &[Vec<f64>], weights: &[f64]) -> f64 {
        let product = multiply(rows, weights);
        let n = weights.len() as f64;
        product
            .iter()
            .zip(weights)
            .map(|(aw, w)| aw / w)
            .sum::<f64>()
            / n
    }
}

fn multiply(rows: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    rows.iter()
        .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
        .collect()
}
