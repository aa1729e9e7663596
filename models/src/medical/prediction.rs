// models/src/medical/prediction.rs

use serde::Serialize;

use crate::medical::disease::Disease;

/// Interpreted output of a disease model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub disease: Disease,
    /// Label exactly as the model returned it.
    pub label: i64,
    pub present: bool,
    pub message: String,
}

impl PredictionResult {
    /// Label `1` means the condition is present; anything else means absent.
    pub fn from_label(disease: Disease, label: i64) -> Self {
        let present = label == 1;
        Self {
            disease,
            label,
            present,
            message: disease.result_message(present).to_string(),
        }
    }
}
