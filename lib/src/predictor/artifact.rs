// lib/src/predictor/artifact.rs

//! Serialized classifiers exported by the training pipeline.
//!
//! Artifacts are tagged documents (`"kind": "logistic" | "linear_svm" |
//! "decision_tree"`). `.json` files are read with serde_json and
//! `.msgpack`/`.mp` files with rmp-serde; MessagePack artifacts must be
//! written with named fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use models::Disease;

use crate::errors::{DashboardError, DashboardResult};
use crate::predictor::{check_row, PredictError, Predictor};

fn default_threshold() -> f64 {
    0.5
}

fn dot(weights: &[f64], row: &[f64], intercept: f64) -> f64 {
    weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + intercept
}

/// Label 1 when `sigmoid(w.x + b) >= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl LogisticRegression {
    pub fn probability(&self, row: &[f64]) -> Result<f64, PredictError> {
        check_row(row, self.weights.len())?;
        let z = dot(&self.weights, row, self.intercept);
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

/// Label 1 when the decision function `w.x + b` is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvm {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// `row[feature] <= threshold` goes left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: i64,
    },
}

/// A binary decision tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn classify(&self, row: &[f64]) -> Result<i64, PredictError> {
        check_row(row, self.n_features)?;
        let mut idx = 0;
        // A well-formed tree reaches a leaf in at most nodes.len() steps.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { label }) => return Ok(*label),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or_else(|| {
                        PredictError::MalformedModel(format!("node {} splits on missing feature {}", idx, feature))
                    })?;
                    idx = if *value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(PredictError::MalformedModel(format!("node {} does not exist", idx)));
                }
            }
        }
        Err(PredictError::MalformedModel("tree contains a cycle".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticRegression),
    LinearSvm(LinearSvm),
    DecisionTree(DecisionTree),
}

impl ModelArtifact {
    /// Reads an artifact, choosing the decoder from the file extension.
    pub fn load(disease: Disease, path: &Path) -> DashboardResult<Self> {
        let load_error = |reason: String| DashboardError::ModelLoad {
            disease,
            path: path.to_path_buf(),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| load_error(e.to_string()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let artifact: ModelArtifact = match extension.as_str() {
            "json" => serde_json::from_slice(&bytes).map_err(|e| load_error(e.to_string()))?,
            "msgpack" | "mp" => rmp_serde::from_slice(&bytes).map_err(|e| load_error(e.to_string()))?,
            other => {
                return Err(load_error(format!("unsupported model format '{}'", other)));
            }
        };
        debug!("Decoded {} model artifact from {:?}: {}", disease, path, artifact.describe());
        Ok(artifact)
    }

    fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Logistic(m) => m.weights.len(),
            ModelArtifact::LinearSvm(m) => m.weights.len(),
            ModelArtifact::DecisionTree(m) => m.n_features,
        }
    }

    fn predict_row(&self, row: &[f64]) -> Result<i64, PredictError> {
        match self {
            ModelArtifact::Logistic(m) => Ok(i64::from(m.probability(row)? >= m.threshold)),
            ModelArtifact::LinearSvm(m) => {
                check_row(row, m.weights.len())?;
                Ok(i64::from(dot(&m.weights, row, m.intercept) > 0.0))
            }
            ModelArtifact::DecisionTree(m) => m.classify(row),
        }
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<i64>, PredictError> {
        batch.iter().map(|row| self.predict_row(row)).collect()
    }

    fn feature_count(&self) -> Option<usize> {
        Some(self.n_features())
    }

    fn describe(&self) -> String {
        match self {
            ModelArtifact::Logistic(m) => {
                format!("logistic regression, {} features, threshold {}", m.weights.len(), m.threshold)
            }
            ModelArtifact::LinearSvm(m) => format!("linear SVM, {} features", m.weights.len()),
            ModelArtifact::DecisionTree(m) => {
                format!("decision tree, {} features, {} nodes", m.n_features, m.nodes.len())
            }
        }
    }
}
