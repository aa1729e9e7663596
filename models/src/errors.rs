// models/src/errors.rs

use std::fmt;

use serde::Serialize;
pub use thiserror::Error;

/// Why a single form field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FieldProblem {
    /// The field was absent or blank.
    Missing,
    /// The text could not be read as a number.
    NotANumber { value: String },
    /// The text parsed, but to NaN or an infinity.
    NotFinite { value: String },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "a value is required"),
            FieldProblem::NotANumber { value } => write!(f, "'{}' is not a number", value),
            FieldProblem::NotFinite { value } => write!(f, "'{}' is not a finite number", value),
        }
    }
}

/// A rejected form field, named by both its key and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{label}: {problem}")]
pub struct FieldError {
    pub field: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub problem: FieldProblem,
}

/// A validation error.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// One or more form fields could not be turned into numbers.
    #[error("{} field(s) are invalid: {}", .0.len(), join_fields(.0))]
    InvalidFields(Vec<FieldError>),
    /// A disease slug that none of the pages answer to.
    #[error("unknown disease '{0}'")]
    UnknownDisease(String),
}

impl ValidationError {
    /// The field-level errors carried by this error, empty for other kinds.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::InvalidFields(errors) => errors,
            ValidationError::UnknownDisease(_) => &[],
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_error_should_serialize_flat() {
        let err = FieldError {
            field: "chol",
            label: "Serum Cholesterol in mg/dl",
            problem: FieldProblem::NotANumber { value: "high".to_string() },
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "field": "chol",
                "label": "Serum Cholesterol in mg/dl",
                "reason": "not_a_number",
                "value": "high",
            })
        );
        let missing = FieldError { field: "age", label: "Age", problem: FieldProblem::Missing };
        assert_eq!(
            serde_json::to_value(&missing).unwrap(),
            json!({ "field": "age", "label": "Age", "reason": "missing" })
        );
    }

    #[test]
    fn unknown_disease_has_no_field_errors() {
        assert!(ValidationError::UnknownDisease("x".into()).field_errors().is_empty());
    }
}
