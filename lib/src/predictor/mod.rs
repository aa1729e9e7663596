// lib/src/predictor/mod.rs

//! The prediction boundary: each disease model is a black box that maps a
//! batch of feature rows to one label per row.

pub mod artifact;
pub mod registry;
pub mod stub;

use thiserror::Error;

pub use artifact::{DecisionTree, LinearSvm, LogisticRegression, ModelArtifact, TreeNode};
pub use registry::PredictorRegistry;

#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("expected {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("model returned no label")]
    EmptyOutput,
    #[error("malformed model: {0}")]
    MalformedModel(String),
}

/// A read-only classifier shared by every session.
pub trait Predictor: Send + Sync + 'static {
    /// One label per input row.
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, PredictError>;

    /// Row length the model was trained on, when the model knows it.
    fn feature_count(&self) -> Option<usize>;

    /// Short human-readable description for logs and `check-models`.
    fn describe(&self) -> String;
}

pub(crate) fn check_row(row: &[f64], expected: usize) -> Result<(), PredictError> {
    if row.len() == expected {
        Ok(())
    } else {
        Err(PredictError::FeatureCount {
            expected,
            found: row.len(),
        })
    }
}
