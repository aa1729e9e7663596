// models/src/medical/features.rs

//! Indicator flags derived from diabetes readings.
//!
//! Bands are half-open with an inclusive upper bound, so a boundary value
//! such as BMI 24.9 falls in the lower band.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    /// (18.5, 24.9]: no flag is set.
    Normal,
    Overweight,
    Obesity1,
    Obesity2,
    Obesity3,
}

impl BmiCategory {
    /// `None` only for NaN, which matches no band.
    pub fn classify(bmi: f64) -> Option<Self> {
        if bmi <= 18.5 {
            Some(BmiCategory::Underweight)
        } else if bmi > 18.5 && bmi <= 24.9 {
            Some(BmiCategory::Normal)
        } else if bmi > 24.9 && bmi <= 29.9 {
            Some(BmiCategory::Overweight)
        } else if bmi > 29.9 && bmi <= 34.9 {
            Some(BmiCategory::Obesity1)
        } else if bmi > 34.9 && bmi <= 39.9 {
            Some(BmiCategory::Obesity2)
        } else if bmi > 39.9 {
            Some(BmiCategory::Obesity3)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseCategory {
    Low,
    Normal,
    Overweight,
    /// Above 126; the name follows the feature the model was trained with.
    Secret,
}

impl GlucoseCategory {
    pub fn classify(glucose: f64) -> Option<Self> {
        if glucose <= 70.0 {
            Some(GlucoseCategory::Low)
        } else if glucose > 70.0 && glucose <= 99.0 {
            Some(GlucoseCategory::Normal)
        } else if glucose > 99.0 && glucose <= 126.0 {
            Some(GlucoseCategory::Overweight)
        } else if glucose > 126.0 {
            Some(GlucoseCategory::Secret)
        } else {
            None
        }
    }
}

pub fn insulin_is_normal(insulin: f64) -> bool {
    (16.0..=166.0).contains(&insulin)
}

/// The categorical features appended to the raw diabetes readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedFeatures {
    pub bmi: Option<BmiCategory>,
    pub insulin_normal: bool,
    pub glucose: Option<GlucoseCategory>,
}

impl DerivedFeatures {
    pub const FLAG_COUNT: usize = 10;

    /// Flag names in the order the diabetes model expects them.
    pub const FLAG_NAMES: [&'static str; Self::FLAG_COUNT] = [
        "NewBMI_Underweight",
        "NewBMI_Overweight",
        "NewBMI_Obesity_1",
        "NewBMI_Obesity_2",
        "NewBMI_Obesity_3",
        "NewInsulinScore_Normal",
        "NewGlucose_Low",
        "NewGlucose_Normal",
        "NewGlucose_Overweight",
        "NewGlucose_Secret",
    ];

    pub fn derive(bmi: f64, insulin: f64, glucose: f64) -> Self {
        Self {
            bmi: BmiCategory::classify(bmi),
            insulin_normal: insulin_is_normal(insulin),
            glucose: GlucoseCategory::classify(glucose),
        }
    }

    pub fn flags(&self) -> [u8; Self::FLAG_COUNT] {
        let mut flags = [0u8; Self::FLAG_COUNT];
        match self.bmi {
            Some(BmiCategory::Underweight) => flags[0] = 1,
            Some(BmiCategory::Overweight) => flags[1] = 1,
            Some(BmiCategory::Obesity1) => flags[2] = 1,
            Some(BmiCategory::Obesity2) => flags[3] = 1,
            Some(BmiCategory::Obesity3) => flags[4] = 1,
            Some(BmiCategory::Normal) | None => {}
        }
        if self.insulin_normal {
            flags[5] = 1;
        }
        match self.glucose {
            Some(GlucoseCategory::Low) => flags[6] = 1,
            Some(GlucoseCategory::Normal) => flags[7] = 1,
            Some(GlucoseCategory::Overweight) => flags[8] = 1,
            Some(GlucoseCategory::Secret) => flags[9] = 1,
            None => {}
        }
        flags
    }
}
