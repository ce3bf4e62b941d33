//! Matrix Validator - structural checks on comparison matrices.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{AhpError, MatrixId, StructuralIssue};
use super::scale::{within_scale, SCALE_MAX, SCALE_MIN};
use super::ComparisonMatrix;

/// Default tolerance for `|m[i][j] - 1/m[j][i]|`.
pub const DEFAULT_RECIPROCAL_TOLERANCE: f64 = 0.001;

/// Knobs for matrix validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Absorbs floating error from reciprocal computation, not user error.
    pub reciprocal_tolerance: f64,
    /// Whether to warn about judgments outside 1/9..9.
    pub check_range: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            reciprocal_tolerance: DEFAULT_RECIPROCAL_TOLERANCE,
            check_range: true,
        }
    }
}

/// An off-diagonal judgment outside the 1/9..9 scale. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeWarning {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} at [{}][{}] is outside the scale [{:.3}, {}]",
            self.value, self.row, self.col, SCALE_MIN, SCALE_MAX
        )
    }
}

/// An off-diagonal entry that is not a positive finite ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvalidEntry {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Outcome of validating one matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixValidation {
    pub issues: Vec<StructuralIssue>,
    #[serde(default)]
    pub invalid_entries: Vec<InvalidEntry>,
    pub warnings: Vec<RangeWarning>,
}

impl MatrixValidation {
    /// True when no structural issue or invalid entry was found.
    /// Warnings do not count.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty() && self.invalid_entries.is_empty()
    }

    /// Converts the issues and invalid entries into run-level errors for `matrix`.
    pub fn errors_for(&self, matrix: &MatrixId) -> Vec<AhpError> {
        let structural = self.issues.iter().map(|issue| AhpError::StructuralMatrix {
            matrix: matrix.clone(),
            issue: issue.clone(),
        });
        let entries = self.invalid_entries.iter().map(|entry| AhpError::InvalidMatrix {
            matrix: matrix.clone(),
            row: entry.row,
            col: entry.col,
            value: entry.value,
        });
        structural.chain(entries).collect()
    }

    /// Renders the warnings with the matrix identity prefixed.
    pub fn warnings_for(&self, matrix: &MatrixId) -> Vec<String> {
        self.warnings
            .iter()
            .map(|w| format!("{}: {}", matrix, w))
            .collect()
    }
}

/// Structural validation of comparison matrices.
pub struct MatrixValidator;

impl MatrixValidator {
    /// Validates a matrix, never failing.
    ///
    /// Checks run in order and stop at the first check that reports a
    /// structural issue; every issue found by that check is returned:
    /// 1. non-empty and square
    /// 2. diagonal entries exactly 1
    /// 3. reciprocal within `rules.reciprocal_tolerance`, reported at the
    ///    lower-triangle cell
    /// 4. range warnings for off-diagonal values outside 1/9..9
    ///
    /// Once the matrix is square, every non-positive or non-finite
    /// off-diagonal entry is collected as well. Those cells are skipped by
    /// the reciprocity and range checks.
    pub fn validate(matrix: &ComparisonMatrix, rules: &ValidationRules) -> MatrixValidation {
        let mut result = MatrixValidation::default();

        result.issues = Self::check_shape(matrix);
        if !result.issues.is_empty() {
            return result;
        }

        result.invalid_entries = Self::check_entries(matrix);

        result.issues = Self::check_diagonal(matrix);
        if !result.issues.is_empty() {
            return result;
        }

        result.issues = Self::check_reciprocal(matrix, rules.reciprocal_tolerance);
        if !result.issues.is_empty() {
            return result;
        }

        if rules.check_range {
            result.warnings = Self::check_range(matrix);
        }

        result
    }

    fn check_shape(matrix: &ComparisonMatrix) -> Vec<StructuralIssue> {
        if matrix.is_empty() {
            return vec![StructuralIssue::Empty];
        }

        let n = matrix.size();
        matrix
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != n)
            .map(|(row, values)| StructuralIssue::NotSquare {
                row,
                length: values.len(),
                expected: n,
            })
            .collect()
    }

    fn check_entries(matrix: &ComparisonMatrix) -> Vec<InvalidEntry> {
        let mut entries = Vec::new();

        for (row, values) in matrix.rows().iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if row != col && !is_usable(value) {
                    entries.push(InvalidEntry { row, col, value });
                }
            }
        }

        entries
    }

    fn check_diagonal(matrix: &ComparisonMatrix) -> Vec<StructuralIssue> {
        matrix
            .rows()
            .iter()
            .enumerate()
            .filter(|(i, row)| row[*i] != 1.0)
            .map(|(index, row)| StructuralIssue::DiagonalNotOne {
                index,
                value: row[index],
            })
            .collect()
    }

    fn check_reciprocal(matrix: &ComparisonMatrix, tolerance: f64) -> Vec<StructuralIssue> {
        let rows = matrix.rows();
        let n = rows.len();
        let mut issues = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                let upper = rows[i][j];
                let lower = rows[j][i];
                if !is_usable(upper) || !is_usable(lower) {
                    continue;
                }

                if (upper - 1.0 / lower).abs() > tolerance {
                    issues.push(StructuralIssue::Asymmetric {
                        row: j,
                        col: i,
                        expected: 1.0 / upper,
                        actual: lower,
                    });
                }
            }
        }

        issues
    }

    fn check_range(matrix: &ComparisonMatrix) -> Vec<RangeWarning> {
        let mut warnings = Vec::new();

        for (row, values) in matrix.rows().iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if row != col && is_usable(value) && !within_scale(value) {
                    warnings.push(RangeWarning { row, col, value });
                }
            }
        }

        warnings
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn validate(rows: Vec<Vec<f64>>) -> MatrixValidation {
        MatrixValidator::validate(&ComparisonMatrix::from_rows(rows), &ValidationRules::default())
    }

    #[test]
    fn reciprocal_matrix_is_valid() {
        let result = validate(vec![
            vec![1.0, 2.0, 6.0],
            vec![0.5, 1.0, 3.0],
            vec![1.0 / 6.0, 1.0 / 3.0, 1.0],
        ]);
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let result = validate(vec![]);
        assert_eq!(result.issues, vec![StructuralIssue::Empty]);
    }

    #[test]
    fn ragged_matrix_is_not_square() {
        let result = validate(vec![vec![1.0, 2.0], vec![0.5]]);
        assert_eq!(
            result.issues,
            vec![StructuralIssue::NotSquare {
                row: 1,
                length: 1,
                expected: 2
            }]
        );
    }

    #[test]
    fn shape_failure_skips_later_checks() {
        // Diagonal is also wrong, but only the shape is reported.
        let result = validate(vec![vec![2.0, 2.0, 1.0], vec![0.5, 1.0]]);
        assert_eq!(
            result.issues,
            vec![StructuralIssue::NotSquare {
                row: 0,
                length: 3,
                expected: 2
            }]
        );
    }

    #[test]
    fn bad_diagonal_is_reported_per_index() {
        let result = validate(vec![vec![1.0, 2.0], vec![0.5, 2.0]]);
        assert_eq!(
            result.issues,
            vec![StructuralIssue::DiagonalNotOne {
                index: 1,
                value: 2.0
            }]
        );
    }

    #[test]
    fn non_reciprocal_pair_cites_lower_cell() {
        let result = validate(vec![vec![1.0, 3.0], vec![1.0, 1.0]]);
        match result.issues.as_slice() {
            [StructuralIssue::Asymmetric {
                row,
                col,
                expected,
                actual,
            }] => {
                assert_eq!((*row, *col), (1, 0));
                assert!((expected - 1.0 / 3.0).abs() < 1e-12);
                assert_eq!(*actual, 1.0);
            }
            other => panic!("Expected one asymmetric issue, got {:?}", other),
        }
    }

    #[test]
    fn rounding_within_tolerance_is_accepted() {
        let result = validate(vec![vec![1.0, 3.0], vec![0.3333, 1.0]]);
        assert!(result.is_ok());
    }

    #[test]
    fn out_of_scale_values_only_warn() {
        let result = validate(vec![vec![1.0, 12.0], vec![1.0 / 12.0, 1.0]]);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[0].row, 0);
        assert_eq!(result.warnings[0].col, 1);
    }

    #[test]
    fn range_check_can_be_disabled() {
        let rules = ValidationRules {
            check_range: false,
            ..ValidationRules::default()
        };
        let matrix = ComparisonMatrix::from_rows(vec![vec![1.0, 12.0], vec![1.0 / 12.0, 1.0]]);
        assert!(MatrixValidator::validate(&matrix, &rules).warnings.is_empty());
    }

    #[test]
    fn non_positive_entries_are_collected_without_range_warnings() {
        let result = validate(vec![
            vec![1.0, -2.0, 0.0],
            vec![-0.5, 1.0, 1.0],
            vec![f64::INFINITY, 1.0, 1.0],
        ]);

        assert!(!result.is_ok());
        assert!(result.issues.is_empty());
        let cells: Vec<(usize, usize)> =
            result.invalid_entries.iter().map(|e| (e.row, e.col)).collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0), (2, 0)]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn invalid_entries_become_invalid_matrix_errors() {
        let result = validate(vec![vec![1.0, 0.0], vec![1.0, 1.0]]);
        let errors = result.errors_for(&MatrixId::Criteria);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), ErrorCode::InvalidMatrix);
        assert!(errors[0].to_string().starts_with("criteria matrix: entry at [0][1] is 0"));
    }

    #[test]
    fn errors_carry_matrix_identity() {
        let result = validate(vec![vec![1.0, 3.0], vec![1.0, 1.0]]);
        let errors = result.errors_for(&MatrixId::alternatives(0, "Price"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .to_string()
            .starts_with("alternatives matrix for criterion 'Price': asymmetric at [1][0]"));
    }
}
