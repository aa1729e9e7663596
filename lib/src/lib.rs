// lib/src/lib.rs

//! Prediction service, session histories and report views for the disease
//! prediction dashboard.

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod predictor;
pub mod report;
pub mod session;

pub use models;

pub use crate::config::{load_dashboard_config, DashboardConfig, ModelPaths, ServerConfig, SessionConfig};
pub use crate::dashboard::Dashboard;
pub use crate::errors::{DashboardError, DashboardResult};
pub use crate::predictor::{ModelArtifact, PredictError, Predictor, PredictorRegistry};
pub use crate::report::{ComparisonChart, HistoryTable, Report, TableCell, TrendChart, NEED_MORE_TESTS_MESSAGE};
pub use crate::session::{Session, SessionHandle, SessionId, SessionStore};
