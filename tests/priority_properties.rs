//! Property tests for the priority solver and synthesis engine.

use proptest::prelude::*;

use ahp_sherpa::domain::ahp::{
    ComparisonMatrix, PriorityMethod, PrioritySolver, PriorityVector, SolverSettings,
    SynthesisEngine,
};

/// Reciprocal n×n matrix from random upper-triangle judgments on the 1/9..9 scale.
fn reciprocal_matrix() -> impl Strategy<Value = ComparisonMatrix> {
    (1usize..=8)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(1.0f64 / 9.0..9.0, n * (n - 1) / 2),
            )
        })
        .prop_map(|(n, judgments)| {
            let mut values = judgments.into_iter();
            let mut builder = ComparisonMatrix::builder(n);
            for i in 0..n {
                for j in (i + 1)..n {
                    let value = values.next().unwrap_or(1.0);
                    builder = builder.compare(i, j, value).unwrap();
                }
            }
            builder.build()
        })
}

/// Normalized criteria weights with matching normalized local vectors.
fn synthesis_inputs() -> impl Strategy<Value = (PriorityVector, Vec<PriorityVector>)> {
    (1usize..6, 1usize..6).prop_flat_map(|(criteria, alternatives)| {
        (
            prop::collection::vec(0.01f64..1.0, criteria),
            prop::collection::vec(prop::collection::vec(0.01f64..1.0, alternatives), criteria),
        )
            .prop_map(|(weights, local)| {
                (
                    PriorityVector::normalized(weights),
                    local.into_iter().map(PriorityVector::normalized).collect(),
                )
            })
    })
}

proptest! {
    #[test]
    fn weights_are_a_distribution(matrix in reciprocal_matrix()) {
        let analysis = PrioritySolver::solve(&matrix, &SolverSettings::default()).unwrap();

        prop_assert_eq!(analysis.weights.len(), matrix.size());
        prop_assert!((analysis.weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(analysis.weights.weights().iter().all(|w| *w >= 0.0));
        prop_assert!(analysis.consistency.ratio >= 0.0);
    }

    #[test]
    fn power_iteration_weights_are_a_distribution(matrix in reciprocal_matrix()) {
        let settings = SolverSettings {
            method: PriorityMethod::PowerIteration,
            ..SolverSettings::default()
        };
        let analysis = PrioritySolver::solve(&matrix, &settings).unwrap();

        prop_assert!((analysis.weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(analysis.weights.weights().iter().all(|w| *w >= 0.0));
    }

    #[test]
    fn small_matrices_are_always_consistent(matrix in reciprocal_matrix()) {
        prop_assume!(matrix.size() <= 2);
        let analysis = PrioritySolver::solve(&matrix, &SolverSettings::default()).unwrap();
        prop_assert_eq!(analysis.consistency_ratio(), 0.0);
        prop_assert!(analysis.consistency.is_acceptable);
    }

    #[test]
    fn synthesized_scores_sum_to_criteria_total((weights, local) in synthesis_inputs()) {
        let result = SynthesisEngine::synthesize(&weights, &local).unwrap();

        prop_assert!((result.total() - weights.sum()).abs() < 1e-9);
        let mut ranked = result.ranked_indices.clone();
        ranked.sort_unstable();
        prop_assert_eq!(ranked, (0..result.alternative_scores.len()).collect::<Vec<_>>());
    }

    #[test]
    fn ranking_is_non_increasing((weights, local) in synthesis_inputs()) {
        let result = SynthesisEngine::synthesize(&weights, &local).unwrap();
        for pair in result.ranked_indices.windows(2) {
            let (a, b) = (result.alternative_scores[pair[0]], result.alternative_scores[pair[1]]);
            prop_assert!(a + 1e-9 >= b);
        }
    }
}
