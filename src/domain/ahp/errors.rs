//! Error taxonomy for pairwise-comparison analysis.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Identifies which comparison matrix of a run an error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixId {
    /// The criterion-vs-criterion matrix.
    Criteria,
    /// The alternative-vs-alternative matrix under one criterion.
    Alternatives {
        criterion_index: usize,
        criterion: String,
    },
}

impl MatrixId {
    /// Identifies the alternatives matrix for a criterion.
    pub fn alternatives(criterion_index: usize, criterion: impl Into<String>) -> Self {
        MatrixId::Alternatives {
            criterion_index,
            criterion: criterion.into(),
        }
    }
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixId::Criteria => write!(f, "criteria matrix"),
            MatrixId::Alternatives { criterion, .. } => {
                write!(f, "alternatives matrix for criterion '{}'", criterion)
            }
        }
    }
}

/// A structural defect of a comparison matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum StructuralIssue {
    Empty,
    NotSquare {
        row: usize,
        length: usize,
        expected: usize,
    },
    DiagonalNotOne {
        index: usize,
        value: f64,
    },
    /// `row`/`col` is the lower-triangle cell that should hold the
    /// reciprocal of the upper-triangle judgment.
    Asymmetric {
        row: usize,
        col: usize,
        expected: f64,
        actual: f64,
    },
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralIssue::Empty => write!(f, "matrix is empty"),
            StructuralIssue::NotSquare {
                row,
                length,
                expected,
            } => write!(
                f,
                "not square: row {} has {} entries, expected {}",
                row, length, expected
            ),
            StructuralIssue::DiagonalNotOne { index, value } => write!(
                f,
                "diagonal must be 1: found {} at [{}][{}]",
                value, index, index
            ),
            StructuralIssue::Asymmetric {
                row,
                col,
                expected,
                actual,
            } => write!(
                f,
                "asymmetric at [{}][{}]: expected {:.4}, found {}",
                row, col, expected, actual
            ),
        }
    }
}

/// Failure of a single matrix, before it is tied to a [`MatrixId`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixFault {
    #[error("{0}")]
    Structural(StructuralIssue),

    #[error("entry at [{row}][{col}] is {value}; comparison values must be positive and finite")]
    InvalidEntry { row: usize, col: usize, value: f64 },
}

impl MatrixFault {
    /// Attaches the matrix identity, producing a run-level error.
    pub fn in_matrix(self, matrix: MatrixId) -> AhpError {
        match self {
            MatrixFault::Structural(issue) => AhpError::StructuralMatrix { matrix, issue },
            MatrixFault::InvalidEntry { row, col, value } => AhpError::InvalidMatrix {
                matrix,
                row,
                col,
                value,
            },
        }
    }
}

/// Errors raised while validating, solving, synthesizing or perturbing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    #[error("{matrix}: {issue}")]
    StructuralMatrix {
        matrix: MatrixId,
        issue: StructuralIssue,
    },

    #[error("{matrix}: entry at [{row}][{col}] is {value}; comparison values must be positive and finite")]
    InvalidMatrix {
        matrix: MatrixId,
        row: usize,
        col: usize,
        value: f64,
    },

    #[error("cannot rescale weights around criterion {criterion_index}: the other criteria carry no weight")]
    DegenerateWeights { criterion_index: usize },

    #[error("{subject}: expected {expected}, got {actual}")]
    InputCardinality {
        subject: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid label: {0}")]
    InvalidLabel(#[from] ValidationError),

    #[error("perturbation step must be strictly between 0 and 1, got {step}")]
    InvalidStep { step: f64 },
}

impl AhpError {
    /// Creates a cardinality error.
    pub fn cardinality(subject: impl Into<String>, expected: usize, actual: usize) -> Self {
        AhpError::InputCardinality {
            subject: subject.into(),
            expected,
            actual,
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::StructuralMatrix { .. } => ErrorCode::StructuralMatrix,
            AhpError::InvalidMatrix { .. } => ErrorCode::InvalidMatrix,
            AhpError::DegenerateWeights { .. } => ErrorCode::DegenerateWeights,
            AhpError::InputCardinality { .. } => ErrorCode::InputCardinality,
            AhpError::InvalidLabel(_) => ErrorCode::InvalidLabel,
            AhpError::InvalidStep { .. } => ErrorCode::InvalidStep,
        }
    }
}
