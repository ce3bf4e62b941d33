//! RunAnalysisHandler - Command handler that runs one AHP analysis.
//!
//! Drives a run through its phases:
//! - Validating: labels, counts and matrix structure, all errors collected
//! - Solving: priority vector and consistency for every matrix
//! - Synthesizing: alternative scores and ranking
//! - AnalyzingSensitivity: criterion weight perturbation
//!
//! The outcome is a pure function of the command.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::engine::{
    StandardMatrixChecker, StandardPerturbationAnalyzer, StandardPriorityEstimator,
    StandardScoreAggregator,
};
use crate::config::AnalysisConfig;
use crate::domain::ahp::{
    named_entities, validate_labels, AhpError, AnalysisFailure, AnalysisMetadata,
    AnalysisOutcome, AnalysisResult, ComparisonMatrix, ConsistencyResult, ConsistencySection,
    CriteriaSection, CriterionConsistency, EntityKind, MatrixId, PriorityAnalysis,
    PriorityVector, PriorityVectors, RankingsSection, RunPhase, ScoredEntity,
};
use crate::domain::foundation::{ErrorCode, InvalidTransition, StateMachine};
use crate::ports::{MatrixChecker, PerturbationAnalyzer, PriorityEstimator, ScoreAggregator};

/// Above this many alternatives, pairwise comparison gets unwieldy.
const ADVISED_MAX_ALTERNATIVES: usize = 10;

/// Above this many criteria, pairwise comparison gets unwieldy.
const ADVISED_MAX_CRITERIA: usize = 8;

/// Command to run an analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RunAnalysisCommand {
    /// Decision goal, carried into the result metadata.
    pub goal: Option<String>,
    /// Alternative labels.
    pub items: Vec<String>,
    pub criteria: Vec<String>,
    /// One alternatives matrix per criterion, in criteria order.
    pub criteria_item_matrices: Vec<ComparisonMatrix>,
    pub criteria_matrix: ComparisonMatrix,
}

/// Handler for analysis runs.
pub struct RunAnalysisHandler {
    checker: Arc<dyn MatrixChecker>,
    estimator: Arc<dyn PriorityEstimator>,
    aggregator: Arc<dyn ScoreAggregator>,
    perturbation: Arc<dyn PerturbationAnalyzer>,
}

impl RunAnalysisHandler {
    pub fn new(
        checker: Arc<dyn MatrixChecker>,
        estimator: Arc<dyn PriorityEstimator>,
        aggregator: Arc<dyn ScoreAggregator>,
        perturbation: Arc<dyn PerturbationAnalyzer>,
    ) -> Self {
        Self {
            checker,
            estimator,
            aggregator,
            perturbation,
        }
    }

    /// Wires the standard stages with the configured settings.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            Arc::new(StandardMatrixChecker::new(config.validation_rules())),
            Arc::new(StandardPriorityEstimator::new(config.solver_settings())),
            Arc::new(StandardScoreAggregator),
            Arc::new(StandardPerturbationAnalyzer::new(config.sensitivity_settings())),
        )
    }

    /// Runs the analysis. Never panics on bad input; failures are returned
    /// as `AnalysisOutcome::Failure`.
    pub fn handle(&self, cmd: &RunAnalysisCommand) -> AnalysisOutcome {
        let mut run = Run::default();

        match self.execute(cmd, &mut run) {
            Ok(result) => {
                info!(
                    criteria = result.metadata.criteria_count,
                    alternatives = result.metadata.alternatives_count,
                    best = result.best_alternative().unwrap_or(""),
                    stability = result.sensitivity.stability.label(),
                    "Analysis completed"
                );
                AnalysisOutcome::Success(result)
            }
            Err(error) => {
                let failure = run.fail(error);
                warn!(
                    phase = %failure.failed_in,
                    code = %failure.code,
                    errors = failure.validation_errors.len(),
                    "Analysis failed: {}",
                    failure.error
                );
                AnalysisOutcome::Failure(failure)
            }
        }
    }

    fn execute(
        &self,
        cmd: &RunAnalysisCommand,
        run: &mut Run,
    ) -> Result<AnalysisResult, RunError> {
        let items: Vec<String> = named_entities(&cmd.items).into_iter().map(|e| e.label).collect();
        let criteria: Vec<String> =
            named_entities(&cmd.criteria).into_iter().map(|e| e.label).collect();

        self.validate(cmd, &items, &criteria, run)?;

        run.advance(RunPhase::Solving)?;
        let criteria_analysis = self
            .estimator
            .estimate(&cmd.criteria_matrix)
            .map_err(|fault| RunError::Stage(vec![fault.in_matrix(MatrixId::Criteria)]))?;
        run.note_consistency(&MatrixId::Criteria, &criteria_analysis.consistency);

        let mut local: Vec<PriorityAnalysis> = Vec::with_capacity(criteria.len());
        for (index, matrix) in cmd.criteria_item_matrices.iter().enumerate() {
            let id = MatrixId::alternatives(index, criteria[index].as_str());
            let analysis = self
                .estimator
                .estimate(matrix)
                .map_err(|fault| RunError::Stage(vec![fault.in_matrix(id.clone())]))?;
            run.note_consistency(&id, &analysis.consistency);
            local.push(analysis);
        }

        run.advance(RunPhase::Synthesizing)?;
        let criteria_weights = criteria_analysis.weights.clone();
        let alternative_weights: Vec<PriorityVector> =
            local.iter().map(|a| a.weights.clone()).collect();
        let synthesis = self
            .aggregator
            .aggregate(&criteria_weights, &alternative_weights)
            .map_err(|e| RunError::Stage(vec![e]))?;

        run.advance(RunPhase::AnalyzingSensitivity)?;
        let sensitivity = self
            .perturbation
            .analyze(&criteria, &criteria_weights, &alternative_weights)
            .map_err(|e| RunError::Stage(vec![e]))?;
        for gap in &sensitivity.gaps {
            run.warnings.push(format!(
                "sensitivity skipped for criterion '{}': {}",
                gap.criterion, gap.reason
            ));
        }

        run.advance(RunPhase::Done)?;

        Ok(AnalysisResult {
            criteria: CriteriaSection {
                detailed: ScoredEntity::ranked(&criteria, criteria_weights.weights()),
                labels: criteria.clone(),
                weights: criteria_weights.weights().to_vec(),
            },
            rankings: RankingsSection {
                detailed: ScoredEntity::ranked(&items, &synthesis.alternative_scores),
                labels: items.clone(),
                scores: synthesis.alternative_scores,
                ranked_indices: synthesis.ranked_indices,
                contributions: synthesis.contributions,
            },
            priority_vectors: PriorityVectors {
                criteria: criteria_weights.weights().to_vec(),
                alternatives: alternative_weights.iter().map(|v| v.weights().to_vec()).collect(),
            },
            consistency: ConsistencySection {
                criteria: criteria_analysis.consistency,
                per_criterion: local
                    .iter()
                    .enumerate()
                    .map(|(criterion_index, analysis)| CriterionConsistency {
                        criterion_index,
                        criterion: criteria[criterion_index].clone(),
                        consistency: analysis.consistency,
                    })
                    .collect(),
            },
            sensitivity,
            warnings: std::mem::take(&mut run.warnings),
            metadata: AnalysisMetadata {
                goal: cmd.goal.clone(),
                criteria_count: criteria.len(),
                alternatives_count: items.len(),
                criteria_consistency_ratio: criteria_analysis.consistency_ratio(),
            },
        })
    }

    /// Collects every label, count and structural error before failing.
    fn validate(
        &self,
        cmd: &RunAnalysisCommand,
        items: &[String],
        criteria: &[String],
        run: &mut Run,
    ) -> Result<(), RunError> {
        debug!(
            items = items.len(),
            criteria = criteria.len(),
            "Validating analysis input"
        );

        let mut errors: Vec<AhpError> = validate_labels(EntityKind::Alternative, &cmd.items)
            .into_iter()
            .chain(validate_labels(EntityKind::Criterion, &cmd.criteria))
            .map(AhpError::from)
            .collect();

        run.warnings.extend(input_size_warnings(items.len(), criteria.len()));

        if cmd.criteria_item_matrices.len() != criteria.len() {
            errors.push(AhpError::cardinality(
                "alternatives matrices (one per criterion)",
                criteria.len(),
                cmd.criteria_item_matrices.len(),
            ));
        }

        self.check_matrix(&MatrixId::Criteria, &cmd.criteria_matrix, criteria.len(), &mut errors, run);
        for (index, matrix) in cmd.criteria_item_matrices.iter().enumerate() {
            let label = criteria
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("#{}", index));
            let id = MatrixId::alternatives(index, label);
            self.check_matrix(&id, matrix, items.len(), &mut errors, run);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RunError::Invalid(errors))
        }
    }

    fn check_matrix(
        &self,
        id: &MatrixId,
        matrix: &ComparisonMatrix,
        expected: usize,
        errors: &mut Vec<AhpError>,
        run: &mut Run,
    ) {
        let validation = self.checker.check(matrix);

        for warning in validation.warnings_for(id) {
            warn!("{}", warning);
            run.warnings.push(warning);
        }

        errors.extend(validation.errors_for(id));
        if validation.issues.is_empty() && matrix.size() != expected {
            errors.push(AhpError::cardinality(
                format!("{} dimension", id),
                expected,
                matrix.size(),
            ));
        }
    }
}

/// Input size advice. Never fatal.
fn input_size_warnings(items: usize, criteria: usize) -> Vec<String> {
    let mut warnings = Vec::new();
    if items < 2 {
        warnings.push("fewer than 2 alternatives: the ranking is trivial".to_string());
    }
    if criteria < 2 {
        warnings.push("fewer than 2 criteria: criteria weights are trivial".to_string());
    }
    if items > ADVISED_MAX_ALTERNATIVES {
        warnings.push(format!(
            "more than {} alternatives: consider narrowing the shortlist",
            ADVISED_MAX_ALTERNATIVES
        ));
    }
    if criteria > ADVISED_MAX_CRITERIA {
        warnings.push(format!(
            "more than {} criteria: consider grouping related criteria",
            ADVISED_MAX_CRITERIA
        ));
    }
    warnings
}

/// Why a run stopped.
enum RunError {
    /// Validation found problems; every one is listed.
    Invalid(Vec<AhpError>),
    /// A stage failed after validation passed.
    Stage(Vec<AhpError>),
    Transition(InvalidTransition<RunPhase>),
}

impl From<InvalidTransition<RunPhase>> for RunError {
    fn from(err: InvalidTransition<RunPhase>) -> Self {
        RunError::Transition(err)
    }
}

/// Mutable bookkeeping of a single run.
#[derive(Default)]
struct Run {
    phase: RunPhase,
    warnings: Vec<String>,
}

impl Run {
    fn advance(&mut self, next: RunPhase) -> Result<(), InvalidTransition<RunPhase>> {
        self.phase = self.phase.transition_to(next)?;
        debug!(phase = %self.phase, "Analysis phase");
        Ok(())
    }

    fn note_consistency(&mut self, id: &MatrixId, consistency: &ConsistencyResult) {
        if !consistency.is_acceptable {
            let warning = format!(
                "{}: consistency ratio {:.3} is not below {} ({})",
                id,
                consistency.ratio,
                consistency.threshold,
                consistency.tier.label()
            );
            warn!("{}", warning);
            self.warnings.push(warning);
        }
    }

    fn fail(&mut self, error: RunError) -> AnalysisFailure {
        let failed_in = self.phase;
        if let Ok(phase) = self.phase.transition_to(RunPhase::Error) {
            self.phase = phase;
        }
        let warnings = std::mem::take(&mut self.warnings);

        match error {
            RunError::Invalid(errors) => AnalysisFailure {
                failed_in,
                code: common_code(&errors),
                error: summarize(&errors),
                validation_errors: errors.iter().map(ToString::to_string).collect(),
                warnings,
            },
            RunError::Stage(errors) => AnalysisFailure {
                failed_in,
                code: common_code(&errors),
                error: summarize(&errors),
                validation_errors: Vec::new(),
                warnings,
            },
            RunError::Transition(err) => AnalysisFailure {
                failed_in,
                code: ErrorCode::InvalidStateTransition,
                error: err.to_string(),
                validation_errors: Vec::new(),
                warnings,
            },
        }
    }
}

/// The shared code of all errors, or `VALIDATION_FAILED` when they differ.
fn common_code(errors: &[AhpError]) -> ErrorCode {
    let mut codes = errors.iter().map(AhpError::code);
    match codes.next() {
        Some(first) if codes.all(|c| c == first) => first,
        _ => ErrorCode::ValidationFailed,
    }
}

fn summarize(errors: &[AhpError]) -> String {
    match errors {
        [single] => single.to_string(),
        _ => format!("{} validation errors", errors.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{
        MatrixFault, MatrixValidation, SensitivityReport, Stability, StructuralIssue,
        SynthesisResult,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn reciprocal_2x2(v: f64) -> ComparisonMatrix {
        ComparisonMatrix::from_rows(vec![vec![1.0, v], vec![1.0 / v, 1.0]])
    }

    /// Cars: Cost favours Sedan 3:1, Comfort favours Coupe 2:1, Cost twice as important.
    fn car_command() -> RunAnalysisCommand {
        RunAnalysisCommand {
            goal: Some("Pick a car".to_string()),
            items: labels(&["Sedan", "Coupe"]),
            criteria: labels(&["Cost", "Comfort"]),
            criteria_item_matrices: vec![reciprocal_2x2(3.0), reciprocal_2x2(0.5)],
            criteria_matrix: reciprocal_2x2(2.0),
        }
    }

    fn handler() -> RunAnalysisHandler {
        RunAnalysisHandler::from_config(&AnalysisConfig::default())
    }

    struct FailingEstimator;

    impl PriorityEstimator for FailingEstimator {
        fn estimate(&self, _matrix: &ComparisonMatrix) -> Result<PriorityAnalysis, MatrixFault> {
            Err(MatrixFault::InvalidEntry {
                row: 0,
                col: 1,
                value: -1.0,
            })
        }
    }

    #[derive(Default)]
    struct CountingAggregator {
        calls: AtomicUsize,
    }

    impl ScoreAggregator for CountingAggregator {
        fn aggregate(
            &self,
            criteria_weights: &PriorityVector,
            alternative_weights: &[PriorityVector],
        ) -> Result<SynthesisResult, AhpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StandardScoreAggregator.aggregate(criteria_weights, alternative_weights)
        }
    }

    struct RejectingChecker;

    impl MatrixChecker for RejectingChecker {
        fn check(&self, _matrix: &ComparisonMatrix) -> MatrixValidation {
            MatrixValidation {
                issues: vec![StructuralIssue::Empty],
                ..MatrixValidation::default()
            }
        }
    }

    struct FailingAnalyzer;

    impl PerturbationAnalyzer for FailingAnalyzer {
        fn analyze(
            &self,
            _criteria: &[String],
            _criteria_weights: &PriorityVector,
            _alternative_weights: &[PriorityVector],
        ) -> Result<SensitivityReport, AhpError> {
            Err(AhpError::InvalidStep { step: 2.0 })
        }
    }

    fn standard_with(
        checker: Arc<dyn MatrixChecker>,
        estimator: Arc<dyn PriorityEstimator>,
        aggregator: Arc<dyn ScoreAggregator>,
        perturbation: Arc<dyn PerturbationAnalyzer>,
    ) -> RunAnalysisHandler {
        RunAnalysisHandler::new(checker, estimator, aggregator, perturbation)
    }

    #[test]
    fn successful_run_ranks_alternatives() {
        let outcome = handler().handle(&car_command());
        let result = outcome.result().expect("run should succeed");

        // Criteria [2/3, 1/3]; Sedan = 2/3·0.75 + 1/3·(1/3) = 0.6111
        assert!((result.criteria.weights[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!((result.rankings.scores[0] - 0.611_111_111).abs() < 1e-6);
        assert_eq!(result.rankings.ranked_indices, vec![0, 1]);
        assert_eq!(result.best_alternative(), Some("Sedan"));
        assert_eq!(result.metadata.criteria_count, 2);
        assert_eq!(result.metadata.alternatives_count, 2);
        assert_eq!(result.metadata.goal.as_deref(), Some("Pick a car"));
        assert_eq!(result.sensitivity.records.len(), 4);
        assert_eq!(outcome.phase(), RunPhase::Done);
    }

    #[test]
    fn scores_sum_to_one() {
        let outcome = handler().handle(&car_command());
        let total: f64 = outcome.result().unwrap().rankings.scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn labels_are_sanitized_in_results() {
        let mut cmd = car_command();
        cmd.items = labels(&["  Sedan ", "Coupe   GT"]);
        let outcome = handler().handle(&cmd);
        assert_eq!(
            outcome.result().unwrap().rankings.labels,
            labels(&["Sedan", "Coupe GT"])
        );
    }

    #[test]
    fn asymmetric_matrix_fails_validation_citing_lower_cell() {
        let mut cmd = car_command();
        cmd.criteria_item_matrices[0] =
            ComparisonMatrix::from_rows(vec![vec![1.0, 3.0], vec![1.0, 1.0]]);

        let outcome = handler().handle(&cmd);
        let failure = outcome.failure().expect("run should fail");

        assert_eq!(failure.failed_in, RunPhase::Validating);
        assert_eq!(failure.code, ErrorCode::StructuralMatrix);
        assert_eq!(failure.validation_errors.len(), 1);
        assert!(failure.validation_errors[0].contains("criterion 'Cost'"));
        assert!(failure.validation_errors[0].contains("[1][0]"));
    }

    #[test]
    fn every_validation_error_is_collected() {
        let cmd = RunAnalysisCommand {
            goal: None,
            items: labels(&["A", "a"]),
            criteria: labels(&["Cost", ""]),
            criteria_item_matrices: vec![ComparisonMatrix::default()],
            criteria_matrix: ComparisonMatrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 1.0]]),
        };

        let failure = handler().handle(&cmd).failure().cloned().unwrap();

        // duplicate item, empty criterion, matrix count, criteria asymmetry, empty matrix
        assert_eq!(failure.validation_errors.len(), 5);
        assert_eq!(failure.code, ErrorCode::ValidationFailed);
        assert_eq!(failure.error, "5 validation errors");
    }

    #[test]
    fn invalid_entries_in_every_matrix_fail_validation() {
        let mut cmd = car_command();
        cmd.criteria_matrix = ComparisonMatrix::from_rows(vec![vec![1.0, 0.0], vec![1.0, 1.0]]);
        cmd.criteria_item_matrices[1] =
            ComparisonMatrix::from_rows(vec![vec![1.0, -1.0], vec![-1.0, 1.0]]);

        let failure = handler().handle(&cmd).failure().cloned().unwrap();

        assert_eq!(failure.failed_in, RunPhase::Validating);
        assert_eq!(failure.code, ErrorCode::InvalidMatrix);
        // [0][1] of the criteria matrix, both off-diagonal cells under Comfort
        assert_eq!(failure.validation_errors.len(), 3);
        assert!(failure.validation_errors[0].starts_with("criteria matrix: entry at [0][1]"));
        assert!(failure.validation_errors[2].contains("criterion 'Comfort'"));
        assert!(!failure.warnings.iter().any(|w| w.contains("outside the scale")));
    }

    #[test]
    fn dimension_mismatch_is_a_cardinality_error() {
        let mut cmd = car_command();
        cmd.criteria_matrix = ComparisonMatrix::uniform(3);

        let failure = handler().handle(&cmd).failure().cloned().unwrap();
        assert_eq!(failure.code, ErrorCode::InputCardinality);
        assert!(failure.error.starts_with("criteria matrix dimension"));
    }

    #[test]
    fn validation_failure_skips_later_stages() {
        let aggregator = Arc::new(CountingAggregator::default());
        let handler = standard_with(
            Arc::new(RejectingChecker),
            Arc::new(StandardPriorityEstimator::default()),
            aggregator.clone(),
            Arc::new(StandardPerturbationAnalyzer::default()),
        );

        let outcome = handler.handle(&car_command());
        assert!(!outcome.is_success());
        assert_eq!(aggregator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn solver_failure_aborts_without_partial_results() {
        let aggregator = Arc::new(CountingAggregator::default());
        let handler = standard_with(
            Arc::new(StandardMatrixChecker::default()),
            Arc::new(FailingEstimator),
            aggregator.clone(),
            Arc::new(StandardPerturbationAnalyzer::default()),
        );

        let failure = handler.handle(&car_command()).failure().cloned().unwrap();
        assert_eq!(failure.failed_in, RunPhase::Solving);
        assert_eq!(failure.code, ErrorCode::InvalidMatrix);
        assert!(failure.error.starts_with("criteria matrix:"));
        assert!(failure.validation_errors.is_empty());
        assert_eq!(aggregator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sensitivity_failure_is_reported_in_its_phase() {
        let handler = standard_with(
            Arc::new(StandardMatrixChecker::default()),
            Arc::new(StandardPriorityEstimator::default()),
            Arc::new(StandardScoreAggregator),
            Arc::new(FailingAnalyzer),
        );

        let failure = handler.handle(&car_command()).failure().cloned().unwrap();
        assert_eq!(failure.failed_in, RunPhase::AnalyzingSensitivity);
        assert_eq!(failure.code, ErrorCode::InvalidStep);
    }

    #[test]
    fn single_criterion_run_notes_sensitivity_gap() {
        let cmd = RunAnalysisCommand {
            goal: None,
            items: labels(&["A", "B"]),
            criteria: labels(&["Only"]),
            criteria_item_matrices: vec![reciprocal_2x2(2.0)],
            criteria_matrix: ComparisonMatrix::uniform(1),
        };

        let outcome = handler().handle(&cmd);
        let result = outcome.result().unwrap();
        assert_eq!(result.sensitivity.gaps.len(), 1);
        assert_eq!(result.sensitivity.stability, Stability::High);
        assert!(result.warnings.iter().any(|w| w.contains("fewer than 2 criteria")));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("sensitivity skipped for criterion 'Only'")));
    }

    #[test]
    fn inconsistent_matrix_warns_but_succeeds() {
        let mut cmd = car_command();
        cmd.items = labels(&["A", "B", "C"]);
        let circular = ComparisonMatrix::from_rows(vec![
            vec![1.0, 9.0, 1.0 / 9.0],
            vec![1.0 / 9.0, 1.0, 9.0],
            vec![9.0, 1.0 / 9.0, 1.0],
        ]);
        cmd.criteria_item_matrices = vec![circular, ComparisonMatrix::uniform(3)];

        let outcome = handler().handle(&cmd);
        let result = outcome.result().unwrap();
        assert!(!result.consistency.per_criterion[0].consistency.is_acceptable);
        assert!(!result.consistency.all_acceptable());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("alternatives matrix for criterion 'Cost': consistency ratio")));
    }

    #[test]
    fn out_of_scale_values_are_warnings() {
        let mut cmd = car_command();
        cmd.criteria_matrix = reciprocal_2x2(12.0);

        let outcome = handler().handle(&cmd);
        let result = outcome.result().unwrap();
        assert_eq!(
            result
                .warnings
                .iter()
                .filter(|w| w.starts_with("criteria matrix"))
                .count(),
            2
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let handler = handler();
        let cmd = car_command();
        assert_eq!(handler.handle(&cmd), handler.handle(&cmd));
    }

    #[test]
    fn common_code_prefers_shared_kind() {
        let errors = vec![
            AhpError::cardinality("a", 1, 2),
            AhpError::cardinality("b", 1, 2),
        ];
        assert_eq!(common_code(&errors), ErrorCode::InputCardinality);
        assert_eq!(summarize(&errors[..1]), "a: expected 1, got 2");
    }
}
