//! Named entities - criteria and alternatives with stable indices.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum label length in characters.
pub const MAX_LABEL_LENGTH: usize = 100;

/// Which side of the hierarchy a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Criterion,
    Alternative,
}

impl EntityKind {
    /// Field prefix used in validation messages.
    pub fn field_name(&self) -> &'static str {
        match self {
            EntityKind::Criterion => "criteria",
            EntityKind::Alternative => "items",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Criterion => write!(f, "criterion"),
            EntityKind::Alternative => write!(f, "alternative"),
        }
    }
}

/// A labelled criterion or alternative.
///
/// The index is the sole key threading identity through matrices and
/// result vectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedEntity {
    pub index: usize,
    pub label: String,
}

impl NamedEntity {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

/// Trims a label and collapses internal runs of whitespace to one space.
pub fn sanitize_label(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitizes labels and assigns indices in input order.
pub fn named_entities(labels: &[String]) -> Vec<NamedEntity> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| NamedEntity::new(index, sanitize_label(label)))
        .collect()
}

/// Validates a label list, collecting every problem found.
///
/// Labels must be non-empty, at most [`MAX_LABEL_LENGTH`] characters and
/// unique ignoring case. Labels are compared after sanitizing.
pub fn validate_labels(kind: EntityKind, labels: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if labels.is_empty() {
        errors.push(ValidationError::empty_field(kind.field_name()));
        return errors;
    }

    let mut seen = HashSet::new();
    for (index, raw) in labels.iter().enumerate() {
        let field = format!("{}[{}]", kind.field_name(), index);
        let label = sanitize_label(raw);

        if label.is_empty() {
            errors.push(ValidationError::empty_field(field));
            continue;
        }

        let length = label.chars().count();
        if length > MAX_LABEL_LENGTH {
            errors.push(ValidationError::too_long(field.clone(), MAX_LABEL_LENGTH, length));
        }

        if !seen.insert(label.to_lowercase()) {
            errors.push(ValidationError::duplicate(field, label));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sanitize_trims_and_collapses_whitespace() {
        assert_eq!(sanitize_label("  Total   cost\tof ownership "), "Total cost of ownership");
    }

    #[test]
    fn named_entities_keep_input_order() {
        let entities = named_entities(&labels(&[" Price ", "Quality"]));
        assert_eq!(entities[0], NamedEntity::new(0, "Price"));
        assert_eq!(entities[1], NamedEntity::new(1, "Quality"));
    }

    #[test]
    fn valid_labels_produce_no_errors() {
        assert!(validate_labels(EntityKind::Criterion, &labels(&["Price", "Quality"])).is_empty());
    }

    #[test]
    fn empty_list_is_rejected() {
        let errors = validate_labels(EntityKind::Alternative, &[]);
        assert_eq!(errors, vec![ValidationError::empty_field("items")]);
    }

    #[test]
    fn blank_label_is_rejected() {
        let errors = validate_labels(EntityKind::Criterion, &labels(&["Price", "   "]));
        assert_eq!(errors, vec![ValidationError::empty_field("criteria[1]")]);
    }

    #[test]
    fn duplicates_are_case_insensitive() {
        let errors = validate_labels(EntityKind::Alternative, &labels(&["Car", "bike", "CAR"]));
        assert_eq!(errors, vec![ValidationError::duplicate("items[2]", "CAR")]);
    }

    #[test]
    fn overlong_label_is_rejected() {
        let long = "x".repeat(MAX_LABEL_LENGTH + 1);
        let errors = validate_labels(EntityKind::Criterion, &[long]);
        assert_eq!(
            errors,
            vec![ValidationError::too_long("criteria[0]", MAX_LABEL_LENGTH, 101)]
        );
    }

    #[test]
    fn all_problems_are_collected() {
        let errors = validate_labels(EntityKind::Criterion, &labels(&["", "A", "a", " "]));
        assert_eq!(errors.len(), 3);
    }
}
