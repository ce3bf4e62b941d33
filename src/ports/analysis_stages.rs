//! Analysis Stage Ports - The four computational stages of a run.
//!
//! The run handler depends on these traits rather than on the concrete
//! domain services, so each stage can be substituted in tests or swapped
//! for a differently configured implementation. All stages are pure and
//! synchronous; they must not retain state between calls.

use crate::domain::ahp::{
    AhpError, ComparisonMatrix, MatrixFault, MatrixValidation, PriorityAnalysis, PriorityVector,
    SensitivityReport, SynthesisResult,
};

/// Port for structural validation of a comparison matrix.
///
/// # Contract
///
/// Implementations must:
/// - Never fail; problems are returned in the `MatrixValidation`
/// - Report every issue of the first failing check
/// - Keep out-of-scale judgments as warnings, not issues
pub trait MatrixChecker: Send + Sync {
    fn check(&self, matrix: &ComparisonMatrix) -> MatrixValidation;
}

/// Port for deriving a priority vector and its consistency from a matrix.
///
/// # Contract
///
/// Implementations must:
/// - Return weights that are non-negative and sum to 1 within 1e-9
/// - Reject non-positive or non-finite entries with `MatrixFault::InvalidEntry`
/// - Be deterministic for identical input
pub trait PriorityEstimator: Send + Sync {
    fn estimate(&self, matrix: &ComparisonMatrix) -> Result<PriorityAnalysis, MatrixFault>;
}

/// Port for combining criteria weights with per-criterion local priorities.
pub trait ScoreAggregator: Send + Sync {
    /// # Errors
    ///
    /// Returns `AhpError::InputCardinality` when the vectors do not line up.
    fn aggregate(
        &self,
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
    ) -> Result<SynthesisResult, AhpError>;
}

/// Port for weight-perturbation sensitivity analysis.
///
/// Criteria whose weights cannot be rescaled are reported as gaps in the
/// returned report, not as errors.
pub trait PerturbationAnalyzer: Send + Sync {
    fn analyze(
        &self,
        criteria: &[String],
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
    ) -> Result<SensitivityReport, AhpError>;
}
