//! Comparison Matrix - reciprocal grid of pairwise preference ratios.

use serde::{Deserialize, Serialize};

use super::scale::parse_comparison_value;
use crate::domain::foundation::ValidationError;

/// An n×n grid where `m[i][j]` is the preference of entity `i` over entity `j`.
///
/// Construction never validates; rows are kept exactly as supplied so that
/// the validator can report what is wrong with them. The matrix is
/// immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonMatrix {
    rows: Vec<Vec<f64>>,
}

impl ComparisonMatrix {
    /// Wraps raw rows as supplied by the caller.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// The n×n matrix expressing no preference between any pair.
    pub fn uniform(n: usize) -> Self {
        Self {
            rows: vec![vec![1.0; n]; n],
        }
    }

    /// Creates a builder for an n×n matrix.
    pub fn builder(n: usize) -> ComparisonMatrixBuilder {
        ComparisonMatrixBuilder::new(n)
    }

    /// Number of rows (the dimension, when the matrix is square).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrowed view of the rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Entry at `[row][col]`, if present.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns true if every row has exactly `size()` entries.
    pub fn is_square(&self) -> bool {
        let n = self.rows.len();
        self.rows.iter().all(|row| row.len() == n)
    }
}

impl From<Vec<Vec<f64>>> for ComparisonMatrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::from_rows(rows)
    }
}

/// Builds a reciprocal matrix from upper-triangle judgments.
///
/// Starts from all ones. Every judgment `compare(i, j, v)` writes `v` to
/// `[i][j]` and `1/v` to `[j][i]`, so the result is reciprocal by construction.
#[derive(Debug, Clone)]
pub struct ComparisonMatrixBuilder {
    rows: Vec<Vec<f64>>,
}

impl ComparisonMatrixBuilder {
    /// Creates a builder for an n×n matrix of ones.
    pub fn new(n: usize) -> Self {
        Self {
            rows: vec![vec![1.0; n]; n],
        }
    }

    /// Records that entity `i` is preferred `value` times over entity `j`.
    ///
    /// # Errors
    ///
    /// Fails when an index is out of bounds, when `i == j`, or when the
    /// value is not strictly positive and finite.
    pub fn compare(mut self, i: usize, j: usize, value: f64) -> Result<Self, ValidationError> {
        let n = self.rows.len();
        let field = format!("judgment[{}][{}]", i, j);

        if i >= n || j >= n {
            return Err(ValidationError::out_of_range(
                field,
                0.0,
                n.saturating_sub(1) as f64,
                i.max(j) as f64,
            ));
        }
        if i == j {
            return Err(ValidationError::invalid_format(
                field,
                "an entity cannot be compared with itself",
            ));
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::invalid_format(
                field,
                format!("{} is not a positive ratio", value),
            ));
        }

        self.rows[i][j] = value;
        self.rows[j][i] = 1.0 / value;
        Ok(self)
    }

    /// Parses a textual judgment (`"3"`, `"1/3"`, `"50%"`) and records it.
    pub fn compare_str(self, i: usize, j: usize, raw: &str) -> Result<Self, ValidationError> {
        let value = parse_comparison_value(raw)?;
        self.compare(i, j, value)
    }

    /// Builds the comparison matrix.
    pub fn build(self) -> ComparisonMatrix {
        ComparisonMatrix { rows: self.rows }
    }
}
