// models/src/medical/reading.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::{FieldError, FieldProblem, ValidationError, ValidationResult};
use crate::medical::disease::Disease;

/// The validated numeric readings of one form submission.
///
/// Values are stored in the disease's field order, so `values()` is already
/// the raw part of the model input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestReading {
    pub disease: Disease,
    values: Vec<f64>,
}

impl TestReading {
    /// Parses raw form text into a reading.
    ///
    /// Every field of the disease schema is checked and all failures are
    /// reported together. Keys that are not part of the schema are ignored.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidFields` listing each field that was
    /// missing, blank, non-numeric or not finite.
    pub fn parse(disease: Disease, raw: &HashMap<String, String>) -> ValidationResult<Self> {
        let mut values = Vec::with_capacity(disease.fields().len());
        let mut errors = Vec::new();

        for spec in disease.fields() {
            match parse_value(raw.get(spec.key).map(String::as_str)) {
                Ok(value) => values.push(value),
                Err(problem) => errors.push(FieldError {
                    field: spec.key,
                    label: spec.label,
                    problem,
                }),
            }
        }

        if errors.is_empty() {
            Ok(Self { disease, values })
        } else {
            Err(ValidationError::InvalidFields(errors))
        }
    }

    /// Builds a reading from values already in field order.
    pub fn from_values(disease: Disease, values: Vec<f64>) -> Option<Self> {
        (values.len() == disease.fields().len()).then_some(Self { disease, values })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.disease
            .fields()
            .iter()
            .position(|f| f.key == key)
            .and_then(|idx| self.values.get(idx).copied())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

fn parse_value(raw: Option<&str>) -> Result<f64, FieldProblem> {
    let text = raw.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(FieldProblem::Missing);
    }
    let value: f64 = text.parse().map_err(|_| FieldProblem::NotANumber {
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(FieldProblem::NotFinite {
            value: text.to_string(),
        });
    }
    Ok(value)
}
