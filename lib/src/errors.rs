// lib/src/errors.rs

use std::path::PathBuf;

use thiserror::Error;

use models::{Disease, ValidationError};

use crate::predictor::PredictError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to load {disease} model from {}: {reason}", path.display())]
    ModelLoad {
        disease: Disease,
        path: PathBuf,
        reason: String,
    },

    #[error("{disease} model expects {found} features but the {disease} form produces {expected}")]
    ModelSchema {
        disease: Disease,
        expected: usize,
        found: usize,
    },

    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
