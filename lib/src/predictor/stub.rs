// lib/src/predictor/stub.rs

//! Deterministic predictors for tests and for running the dashboard
//! without trained artifacts.

use std::sync::Mutex;

use crate::predictor::{PredictError, Predictor};

/// Returns the same label for every row.
#[derive(Debug, Clone, Copy)]
pub struct FixedLabel(pub i64);

impl Predictor for FixedLabel {
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, PredictError> {
        Ok(vec![self.0; batch.len()])
    }

    fn feature_count(&self) -> Option<usize> {
        None
    }

    fn describe(&self) -> String {
        format!("fixed label {}", self.0)
    }
}

/// Label 1 when `row[feature] > threshold`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdStub {
    pub feature: usize,
    pub threshold: f64,
}

impl Predictor for ThresholdStub {
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, PredictError> {
        batch
            .iter()
            .map(|row| {
                row.get(self.feature)
                    .map(|value| i64::from(*value > self.threshold))
                    .ok_or(PredictError::FeatureCount {
                        expected: self.feature + 1,
                        found: row.len(),
                    })
            })
            .collect()
    }

    fn feature_count(&self) -> Option<usize> {
        None
    }

    fn describe(&self) -> String {
        format!("threshold stub on feature {} > {}", self.feature, self.threshold)
    }
}

/// Wraps another predictor and keeps every row it was asked about.
#[derive(Debug, Default)]
pub struct Recording<P> {
    pub inner: P,
    rows: Mutex<Vec<Vec<f64>>>,
}

impl<P: Predictor> Recording<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl<P: Predictor> Predictor for Recording<P> {
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, PredictError> {
        if let Ok(mut rows) = self.rows.lock() {
            rows.extend(batch.iter().map(|row| row.to_vec()));
        }
        self.inner.predict(batch)
    }

    fn feature_count(&self) -> Option<usize> {
        self.inner.feature_count()
    }

    fn describe(&self) -> String {
        format!("recording {}", self.inner.describe())
    }
}
