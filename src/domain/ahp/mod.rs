//! AHP Module - Pure domain services for pairwise-comparison analysis.
//!
//! # Components
//!
//! - `ComparisonMatrix` - Reciprocal judgment matrix and its builder
//! - `MatrixValidator` - Shape, diagonal, reciprocity and scale checks
//! - `PrioritySolver` - Priority vector and consistency ratio of one matrix
//! - `SynthesisEngine` - Weighted aggregation of local priorities into scores
//! - `SensitivityAnalyzer` - Ranking stability under criterion weight perturbation
//! - `AnalysisOutcome` - Tagged success/failure result of a run
//!
//! Everything here is synchronous and free of I/O. A run is a function of
//! its inputs; no state survives between runs.

mod comparison_matrix;
mod consistency;
mod entity;
mod errors;
mod matrix_validator;
mod outcome;
mod priority_solver;
mod run_phase;
mod scale;
mod sensitivity;
mod synthesis;

// Re-export all public types
pub use comparison_matrix::{ComparisonMatrix, ComparisonMatrixBuilder};
pub use consistency::{
    ConsistencyResult, ConsistencyTier, RandomIndexPolicy, DEFAULT_CONSISTENCY_THRESHOLD,
    RANDOM_INDEX,
};
pub use entity::{
    named_entities, sanitize_label, validate_labels, EntityKind, NamedEntity, MAX_LABEL_LENGTH,
};
pub use errors::{AhpError, MatrixFault, MatrixId, StructuralIssue};
pub use matrix_validator::{
    InvalidEntry, MatrixValidation, MatrixValidator, RangeWarning, ValidationRules,
    DEFAULT_RECIPROCAL_TOLERANCE,
};
pub use outcome::{
    AnalysisFailure, AnalysisMetadata, AnalysisOutcome, AnalysisReport, AnalysisResult,
    ConsistencySection, CriteriaSection, CriterionConsistency, PriorityVectors, RankingsSection,
    ScoredEntity,
};
pub use priority_solver::{
    PriorityAnalysis, PriorityMethod, PrioritySolver, PriorityVector, SolverSettings,
};
pub use run_phase::RunPhase;
pub use scale::{parse_comparison_value, within_scale, SCALE_MAX, SCALE_MIN};
pub use sensitivity::{
    impact, MostSensitive, PerturbationDirection, RankShift, SensitivityAnalyzer,
    SensitivityGap, SensitivityRecord, SensitivityReport, SensitivitySettings, Stability,
    DEFAULT_PERTURBATION_STEP, DEFAULT_RECOMMENDATION_THRESHOLD,
};
pub use synthesis::{rank_descending, SynthesisEngine, SynthesisResult, TIE_TOLERANCE};
