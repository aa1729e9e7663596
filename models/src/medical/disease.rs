// models/src/medical/disease.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One labeled numeric input on a disease form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
}

/// A value kept in the history summary, read from one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricSpec {
    pub name: &'static str,
    pub field: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec { key, label }
}

const fn metric(name: &'static str, field: &'static str) -> MetricSpec {
    MetricSpec { name, field }
}

// Field order is the order the trained models expect their features in.
const DIABETES_FIELDS: &[FieldSpec] = &[
    field("Pregnancies", "Number of Pregnancies"),
    field("Glucose", "Glucose Level"),
    field("BloodPressure", "BloodPressure Value"),
    field("SkinThickness", "SkinThickness Value"),
    field("Insulin", "Insulin Value"),
    field("BMI", "BMI Value"),
    field("DiabetesPedigreeFunction", "DiabetesPedigreeFunction Value"),
    field("Age", "Age"),
];

const HEART_FIELDS: &[FieldSpec] = &[
    field("age", "Age"),
    field("sex", "Sex"),
    field("cp", "Chest Pain Types"),
    field("trestbps", "Resting Blood Pressure"),
    field("chol", "Serum Cholesterol in mg/dl"),
    field("fbs", "Fasting Blood Sugar > 120 mg/dl"),
    field("restecg", "Resting Electrocardiographic results"),
    field("thalach", "Maximum Heart Rate achieved"),
    field("exang", "Exercise Induced Angina"),
    field("oldpeak", "ST depression induced by exercise"),
    field("slope", "Slope of the peak exercise ST segment"),
    field("ca", "Major vessels colored by fluoroscopy"),
    field("thal", "thal: 0 = normal; 1 = fixed defect; 2 = reversible defect"),
];

const KIDNEY_FIELDS: &[FieldSpec] = &[
    field("age", "Age"),
    field("blood_pressure", "Blood Pressure"),
    field("specific_gravity", "Specific Gravity"),
    field("albumin", "Albumin"),
    field("sugar", "Sugar"),
    field("red_blood_cells", "Red Blood Cells"),
    field("pus_cell", "Pus Cell"),
    field("serum_creatinine", "Serum Creatinine"),
    field("blood_urea", "Blood Urea"),
    field("hemoglobin", "Hemoglobin"),
    field("diabetes_mellitus", "Diabetes Mellitus"),
    field("coronary_artery_disease", "Coronary Artery Disease"),
    field("appetite", "Appetite"),
    field("pedal_edema", "Pedal Edema"),
    field("anemia", "Anemia"),
];

const DIABETES_SUMMARY: &[MetricSpec] = &[
    metric("Pregnancies", "Pregnancies"),
    metric("Glucose", "Glucose"),
    metric("BloodPressure", "BloodPressure"),
    metric("BMI", "BMI"),
    metric("Age", "Age"),
];

const HEART_SUMMARY: &[MetricSpec] = &[
    metric("Age", "age"),
    metric("Cholesterol", "chol"),
    metric("Blood Pressure", "trestbps"),
    metric("Max HR", "thalach"),
];

const KIDNEY_SUMMARY: &[MetricSpec] = &[
    metric("Age", "age"),
    metric("Blood Pressure", "blood_pressure"),
    metric("Specific Gravity", "specific_gravity"),
    metric("Albumin", "albumin"),
    metric("Blood Urea", "blood_urea"),
];

/// The three conditions the dashboard has a model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Diabetes,
    Heart,
    Kidney,
}

impl Disease {
    /// Navigation order. The first entry is the landing page.
    pub const ALL: [Disease; 3] = [Disease::Diabetes, Disease::Heart, Disease::Kidney];

    pub fn slug(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::Heart => "heart",
            Disease::Kidney => "kidney",
        }
    }

    /// Short display name, also used in chart titles and button captions.
    pub fn name(&self) -> &'static str {
        match self {
            Disease::Diabetes => "Diabetes",
            Disease::Heart => "Heart Disease",
            Disease::Kidney => "Kidney Disease",
        }
    }

    pub fn menu_label(&self) -> String {
        format!("{} Prediction", self.name())
    }

    pub fn page_title(&self) -> String {
        format!("{} Prediction Using Machine Learning", self.name())
    }

    pub fn button_label(&self) -> String {
        format!("{} Test Result", self.name())
    }

    /// Raw form inputs, in model feature order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Disease::Diabetes => DIABETES_FIELDS,
            Disease::Heart => HEART_FIELDS,
            Disease::Kidney => KIDNEY_FIELDS,
        }
    }

    /// Values copied into each history entry.
    pub fn summary_metrics(&self) -> &'static [MetricSpec] {
        match self {
            Disease::Diabetes => DIABETES_SUMMARY,
            Disease::Heart => HEART_SUMMARY,
            Disease::Kidney => KIDNEY_SUMMARY,
        }
    }

    /// Metric names plotted in the comparison and trend views.
    pub fn comparison_metrics(&self) -> &'static [&'static str] {
        match self {
            Disease::Diabetes => &["Glucose", "BloodPressure", "BMI", "Age"],
            Disease::Heart => &["Cholesterol", "Blood Pressure", "Max HR", "Age"],
            Disease::Kidney => &["Blood Pressure", "Specific Gravity", "Albumin", "Blood Urea", "Age"],
        }
    }

    /// Length of the vector the model for this disease was trained on.
    pub fn feature_count(&self) -> usize {
        match self {
            Disease::Diabetes => DIABETES_FIELDS.len() + super::features::DerivedFeatures::FLAG_COUNT,
            Disease::Heart => HEART_FIELDS.len(),
            Disease::Kidney => KIDNEY_FIELDS.len(),
        }
    }

    /// Result banner text for a positive or negative outcome.
    pub fn result_message(&self, present: bool) -> &'static str {
        match (self, present) {
            (Disease::Diabetes, true) => "The person has diabetes",
            (Disease::Diabetes, false) => "The person does not have diabetes",
            (Disease::Heart, true) => "This person has heart disease",
            (Disease::Heart, false) => "This person does not have heart disease",
            (Disease::Kidney, true) => "This person has kidney disease",
            (Disease::Kidney, false) => "This person does not have kidney disease",
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Disease {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diabetes" => Ok(Disease::Diabetes),
            "heart" | "heart-disease" => Ok(Disease::Heart),
            "kidney" | "kidney-disease" => Ok(Disease::Kidney),
            _ => Err(ValidationError::UnknownDisease(s.to_string())),
        }
    }
}
