// models/src/medical/mod.rs

pub mod disease;
pub mod features;
pub mod history;
pub mod model_input;
pub mod prediction;
pub mod reading;

pub use disease::{Disease, FieldSpec, MetricSpec};
pub use features::{BmiCategory, DerivedFeatures, GlucoseCategory};
pub use history::{DiseaseHistory, HistoryEntry, MetricValue};
pub use model_input::ModelInputVector;
pub use prediction::PredictionResult;
pub use reading::TestReading;
