// models/src/lib.rs

//! Domain types for the disease prediction dashboard: form schemas,
//! validated readings, derived features, model inputs and session history.

pub mod errors;
pub mod medical;

pub use errors::{FieldError, FieldProblem, ValidationError, ValidationResult};
pub use medical::{
    BmiCategory, DerivedFeatures, Disease, DiseaseHistory, FieldSpec, GlucoseCategory, HistoryEntry,
    MetricSpec, MetricValue, ModelInputVector, PredictionResult, TestReading,
};
