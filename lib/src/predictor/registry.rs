// lib/src/predictor/registry.rs

use std::sync::Arc;

use tracing::{error, info};

use models::{Disease, ModelInputVector, PredictionResult};

use crate::config::ModelPaths;
use crate::errors::{DashboardError, DashboardResult};
use crate::predictor::{ModelArtifact, PredictError, Predictor};

/// One loaded model per disease. Built once at startup and never mutated.
#[derive(Clone)]
pub struct PredictorRegistry {
    diabetes: Arc<dyn Predictor>,
    heart: Arc<dyn Predictor>,
    kidney: Arc<dyn Predictor>,
}

impl std::fmt::Debug for PredictorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorRegistry")
            .field("diabetes", &self.diabetes.describe())
            .field("heart", &self.heart.describe())
            .field("kidney", &self.kidney.describe())
            .finish()
    }
}

impl PredictorRegistry {
    /// Checks each predictor that reports its row length against the form
    /// that feeds it.
    pub fn new(
        diabetes: Arc<dyn Predictor>,
        heart: Arc<dyn Predictor>,
        kidney: Arc<dyn Predictor>,
    ) -> DashboardResult<Self> {
        for (disease, predictor) in [
            (Disease::Diabetes, &diabetes),
            (Disease::Heart, &heart),
            (Disease::Kidney, &kidney),
        ] {
            if let Some(found) = predictor.feature_count() {
                let expected = disease.feature_count();
                if found != expected {
                    return Err(DashboardError::ModelSchema {
                        disease,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(Self {
            diabetes,
            heart,
            kidney,
        })
    }

    /// Loads the three serialized models. Any failure is fatal to startup.
    pub fn load(paths: &ModelPaths) -> DashboardResult<Self> {
        let load = |disease: Disease| -> DashboardResult<Arc<dyn Predictor>> {
            let path = paths.path_for(disease);
            let artifact = ModelArtifact::load(disease, path)?;
            info!("Loaded {} model from {:?} ({})", disease, path, artifact.describe());
            Ok(Arc::new(artifact))
        };
        let diabetes = load(Disease::Diabetes)?;
        let heart = load(Disease::Heart)?;
        let kidney = load(Disease::Kidney)?;
        Self::new(diabetes, heart, kidney)
    }

    pub fn get(&self, disease: Disease) -> &Arc<dyn Predictor> {
        match disease {
            Disease::Diabetes => &self.diabetes,
            Disease::Heart => &self.heart,
            Disease::Kidney => &self.kidney,
        }
    }

    /// Runs the disease's model on a single-row batch.
    pub fn predict(&self, input: &ModelInputVector) -> DashboardResult<PredictionResult> {
        let labels = self.get(input.disease).predict(&input.as_batch()).map_err(|e| {
            error!("{} model failed on a {}-feature row: {}", input.disease, input.len(), e);
            e
        })?;
        let label = labels.first().copied().ok_or(PredictError::EmptyOutput)?;
        Ok(PredictionResult::from_label(input.disease, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::stub::FixedLabel;
    use crate::predictor::{LinearSvm, LogisticRegression};
    use std::fs;
    use tempfile::tempdir;

    fn fixed(label: i64) -> Arc<dyn Predictor> {
        Arc::new(FixedLabel(label))
    }

    fn svm(n: usize) -> ModelArtifact {
        ModelArtifact::LinearSvm(LinearSvm { weights: vec![0.0; n], intercept: 1.0 })
    }

    #[test]
    fn should_reject_model_with_wrong_feature_count() {
        let err = PredictorRegistry::new(fixed(0), Arc::new(svm(12)), fixed(0)).unwrap_err();
        match err {
            DashboardError::ModelSchema { disease, expected, found } => {
                assert_eq!(disease, Disease::Heart);
                assert_eq!(expected, 13);
                assert_eq!(found, 12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_route_by_disease() {
        let registry = PredictorRegistry::new(fixed(1), fixed(0), fixed(1)).unwrap();
        let heart = models::TestReading::from_values(Disease::Heart, vec![0.0; 13]).unwrap();
        let result = registry.predict(&ModelInputVector::build(&heart)).unwrap();
        assert!(!result.present);
        assert_eq!(result.message, "This person does not have heart disease");

        let kidney = models::TestReading::from_values(Disease::Kidney, vec![0.0; 15]).unwrap();
        assert!(registry.predict(&ModelInputVector::build(&kidney)).unwrap().present);
    }

    #[test]
    fn should_load_models_from_directory() {
        let dir = tempdir().unwrap();
        let diabetes = ModelArtifact::Logistic(LogisticRegression {
            weights: vec![0.0; 18],
            intercept: -2.0,
            threshold: 0.5,
        });
        fs::write(dir.path().join("diabetes.json"), serde_json::to_vec(&diabetes).unwrap()).unwrap();
        fs::write(dir.path().join("heart.json"), serde_json::to_vec(&svm(13)).unwrap()).unwrap();
        fs::write(dir.path().join("kidney.json"), serde_json::to_vec(&svm(15)).unwrap()).unwrap();

        let registry = PredictorRegistry::load(&ModelPaths::in_dir(dir.path())).unwrap();
        assert_eq!(registry.get(Disease::Diabetes).feature_count(), Some(18));
        assert_eq!(registry.get(Disease::Kidney).describe(), "linear SVM, 15 features");
    }

    #[test]
    fn missing_model_file_should_fail_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("diabetes.json"), b"{\"kind\":\"linear_svm\",\"weights\":[],\"intercept\":0}").unwrap();
        let err = PredictorRegistry::load(&ModelPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, DashboardError::ModelLoad { disease: Disease::Heart, .. }));
    }

    #[test]
    fn bundled_models_should_load() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../saved_models");
        let registry = PredictorRegistry::load(&ModelPaths::in_dir(&dir)).unwrap();
        for disease in Disease::ALL {
            let reading = models::TestReading::from_values(disease, vec![1.0; disease.fields().len()]).unwrap();
            let result = registry.predict(&ModelInputVector::build(&reading)).unwrap();
            assert_eq!(result.message, disease.result_message(result.present));
        }
    }
}
