//! AnalysisInput - JSON document describing one analysis.
//!
//! ```json
//! {
//!   "goal": "Pick a car",
//!   "items": ["Sedan", "Coupe"],
//!   "criteria": ["Cost", "Comfort"],
//!   "criteria_matrix": [[1, 2], ["1/2", 1]],
//!   "criteria_item_matrices": [
//!     [{"row": 0, "col": 1, "value": 3}],
//!     [{"row": 0, "col": 1, "value": "50%"}]
//!   ]
//! }
//! ```
//!
//! A matrix is either full rows or a list of upper-triangle judgments;
//! pairs without a judgment default to 1. An empty array is an empty
//! matrix, not an all-ones one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ahp::{parse_comparison_value, ComparisonMatrix};
use crate::domain::foundation::ValidationError;

use super::run_analysis::RunAnalysisCommand;

/// Errors turning an input document into a command.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Malformed analysis input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{location}: {source}")]
    Value {
        location: String,
        #[source]
        source: ValidationError,
    },
}

/// A comparison value as written: a number or text like `"1/3"` or `"50%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonValue {
    Number(f64),
    Text(String),
}

impl ComparisonValue {
    /// Numbers pass through unchecked; the validator and solver judge them.
    pub fn resolve(&self) -> Result<f64, ValidationError> {
        match self {
            ComparisonValue::Number(value) => Ok(*value),
            ComparisonValue::Text(text) => parse_comparison_value(text),
        }
    }
}

/// One pairwise judgment: `row` is preferred over `col` by `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub row: usize,
    pub col: usize,
    pub value: ComparisonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixInput {
    Rows(Vec<Vec<ComparisonValue>>),
    Judgments(Vec<Judgment>),
}

impl MatrixInput {
    /// Builds the matrix. `size` is only used for judgment lists.
    pub fn to_matrix(&self, size: usize, name: &str) -> Result<ComparisonMatrix, InputError> {
        match self {
            MatrixInput::Rows(rows) => {
                let mut resolved = Vec::with_capacity(rows.len());
                for (r, row) in rows.iter().enumerate() {
                    let values = row
                        .iter()
                        .enumerate()
                        .map(|(c, value)| {
                            value.resolve().map_err(|source| InputError::Value {
                                location: format!("{}[{}][{}]", name, r, c),
                                source,
                            })
                        })
                        .collect::<Result<Vec<f64>, InputError>>()?;
                    resolved.push(values);
                }
                Ok(ComparisonMatrix::from_rows(resolved))
            }
            MatrixInput::Judgments(judgments) => {
                let mut builder = ComparisonMatrix::builder(size);
                for judgment in judgments {
                    let location = format!("{}[{}][{}]", name, judgment.row, judgment.col);
                    let value = judgment
                        .value
                        .resolve()
                        .map_err(|source| InputError::Value {
                            location: location.clone(),
                            source,
                        })?;
                    builder = builder
                        .compare(judgment.row, judgment.col, value)
                        .map_err(|source| InputError::Value { location, source })?;
                }
                Ok(builder.build())
            }
        }
    }
}

/// Input document for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Free-text decision goal, shown in the result metadata and summary.
    #[serde(default)]
    pub goal: Option<String>,
    pub items: Vec<String>,
    pub criteria: Vec<String>,
    pub criteria_matrix: MatrixInput,
    pub criteria_item_matrices: Vec<MatrixInput>,
}

impl AnalysisInput {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves every matrix into a command.
    ///
    /// Matrix sizes are not checked here; the run validates them.
    pub fn into_command(self) -> Result<RunAnalysisCommand, InputError> {
        let criteria_matrix = self
            .criteria_matrix
            .to_matrix(self.criteria.len(), "criteria_matrix")?;

        let criteria_item_matrices = self
            .criteria_item_matrices
            .iter()
            .enumerate()
            .map(|(i, m)| m.to_matrix(self.items.len(), &format!("criteria_item_matrices[{}]", i)))
            .collect::<Result<Vec<_>, _>>()?;

        let goal = self
            .goal
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        Ok(RunAnalysisCommand {
            goal,
            items: self.items,
            criteria: self.criteria,
            criteria_item_matrices,
            criteria_matrix,
        })
    }
}
