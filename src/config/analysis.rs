//! Analysis configuration

use serde::Deserialize;

use crate::domain::ahp::{
    PriorityMethod, RandomIndexPolicy, SensitivitySettings, SolverSettings, ValidationRules,
    DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_PERTURBATION_STEP, DEFAULT_RECIPROCAL_TOLERANCE,
    DEFAULT_RECOMMENDATION_THRESHOLD,
};

use super::error::ValidationError;

/// Numerical knobs of an analysis run
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// CR below this is acceptable
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Allowed `|m[i][j] - 1/m[j][i]|`
    #[serde(default = "default_reciprocal_tolerance")]
    pub reciprocal_tolerance: f64,

    /// Relative criterion weight perturbation for sensitivity analysis
    #[serde(default = "default_sensitivity_step")]
    pub sensitivity_step: f64,

    /// Eigenvector approximation
    #[serde(default)]
    pub priority_method: PriorityMethod,

    /// Random Index for matrices larger than 10×10
    #[serde(default)]
    pub random_index_policy: RandomIndexPolicy,

    /// Sensitivity impact above which a recommendation is emitted
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: f64,

    /// Warn about judgments outside 1/9..9
    #[serde(default = "default_check_value_range")]
    pub check_value_range: bool,
}

impl AnalysisConfig {
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            reciprocal_tolerance: self.reciprocal_tolerance,
            check_range: self.check_value_range,
        }
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            method: self.priority_method,
            random_index_policy: self.random_index_policy,
            consistency_threshold: self.consistency_threshold,
        }
    }

    pub fn sensitivity_settings(&self) -> SensitivitySettings {
        SensitivitySettings {
            step: self.sensitivity_step,
            recommendation_threshold: self.recommendation_threshold,
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_open_unit(self.consistency_threshold) {
            return Err(ValidationError::InvalidConsistencyThreshold(
                self.consistency_threshold,
            ));
        }
        if !(self.reciprocal_tolerance.is_finite() && self.reciprocal_tolerance > 0.0) {
            return Err(ValidationError::InvalidReciprocalTolerance(
                self.reciprocal_tolerance,
            ));
        }
        if !is_open_unit(self.sensitivity_step) {
            return Err(ValidationError::InvalidSensitivityStep(self.sensitivity_step));
        }
        if !(self.recommendation_threshold.is_finite() && self.recommendation_threshold >= 0.0) {
            return Err(ValidationError::InvalidRecommendationThreshold(
                self.recommendation_threshold,
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            reciprocal_tolerance: default_reciprocal_tolerance(),
            sensitivity_step: default_sensitivity_step(),
            priority_method: PriorityMethod::default(),
            random_index_policy: RandomIndexPolicy::default(),
            recommendation_threshold: default_recommendation_threshold(),
            check_value_range: default_check_value_range(),
        }
    }
}

fn is_open_unit(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

fn default_consistency_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

fn default_reciprocal_tolerance() -> f64 {
    DEFAULT_RECIPROCAL_TOLERANCE
}

fn default_sensitivity_step() -> f64 {
    DEFAULT_PERTURBATION_STEP
}

fn default_recommendation_threshold() -> f64 {
    DEFAULT_RECOMMENDATION_THRESHOLD
}

fn default_check_value_range() -> bool {
    true
}
