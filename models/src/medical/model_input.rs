// models/src/medical/model_input.rs

use serde::Serialize;

use crate::medical::disease::Disease;
use crate::medical::features::DerivedFeatures;
use crate::medical::reading::TestReading;

/// The ordered feature row handed to a disease model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInputVector {
    pub disease: Disease,
    pub features: Option<DerivedFeatures>,
    values: Vec<f64>,
}

impl ModelInputVector {
    /// Raw readings in field order; for diabetes the derived flags follow.
    pub fn build(reading: &TestReading) -> Self {
        let mut values = reading.values().to_vec();
        let features = match reading.disease {
            Disease::Diabetes => {
                let reading_of = |key: &str| reading.get(key).unwrap_or(f64::NAN);
                let derived = DerivedFeatures::derive(
                    reading_of("BMI"),
                    reading_of("Insulin"),
                    reading_of("Glucose"),
                );
                values.extend(derived.flags().iter().map(|flag| f64::from(*flag)));
                Some(derived)
            }
            Disease::Heart | Disease::Kidney => None,
        };
        Self {
            disease: reading.disease,
            features,
            values,
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Wraps the row as a one-row batch.
    pub fn as_batch(&self) -> [&[f64]; 1] {
        [self.values.as_slice()]
    }
}
