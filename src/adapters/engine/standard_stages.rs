//! Standard stage adapters backed by the domain services.

use crate::domain::ahp::{
    AhpError, ComparisonMatrix, MatrixFault, MatrixValidation, MatrixValidator, PriorityAnalysis,
    PrioritySolver, PriorityVector, SensitivityAnalyzer, SensitivityReport, SensitivitySettings,
    SolverSettings, SynthesisEngine, SynthesisResult, ValidationRules,
};
use crate::ports::{MatrixChecker, PerturbationAnalyzer, PriorityEstimator, ScoreAggregator};

/// Matrix checker using [`MatrixValidator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMatrixChecker {
    rules: ValidationRules,
}

impl StandardMatrixChecker {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }
}

impl MatrixChecker for StandardMatrixChecker {
    fn check(&self, matrix: &ComparisonMatrix) -> MatrixValidation {
        MatrixValidator::validate(matrix, &self.rules)
    }
}

/// Priority estimator using [`PrioritySolver`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPriorityEstimator {
    settings: SolverSettings,
}

impl StandardPriorityEstimator {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }
}

impl PriorityEstimator for StandardPriorityEstimator {
    fn estimate(&self, matrix: &ComparisonMatrix) -> Result<PriorityAnalysis, MatrixFault> {
        PrioritySolver::solve(matrix, &self.settings)
    }
}

/// Score aggregator using [`SynthesisEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScoreAggregator;

impl ScoreAggregator for StandardScoreAggregator {
    fn aggregate(
        &self,
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
    ) -> Result<SynthesisResult, AhpError> {
        SynthesisEngine::synthesize(criteria_weights, alternative_weights)
    }
}

/// Perturbation analyzer using [`SensitivityAnalyzer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPerturbationAnalyzer {
    settings: SensitivitySettings,
}

impl StandardPerturbationAnalyzer {
    pub fn new(settings: SensitivitySettings) -> Self {
        Self { settings }
    }
}

impl PerturbationAnalyzer for StandardPerturbationAnalyzer {
    fn analyze(
        &self,
        criteria: &[String],
        criteria_weights: &PriorityVector,
        alternative_weights: &[PriorityVector],
    ) -> Result<SensitivityReport, AhpError> {
        SensitivityAnalyzer::analyze(criteria, criteria_weights, alternative_weights, &self.settings)
    }
}
