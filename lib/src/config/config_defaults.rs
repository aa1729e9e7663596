// lib/src/config/config_defaults.rs

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_MODELS_DIRECTORY: &str = "saved_models";
pub const DEFAULT_CONFIG_FILE_STEM: &str = "dashboard";
pub const ENV_PREFIX: &str = "DASHBOARD";
pub const ENV_SEPARATOR: &str = "__";

pub fn default_host() -> String { DEFAULT_HOST.to_string() }
pub fn default_port() -> u16 { DEFAULT_PORT }
pub fn default_idle_timeout_secs() -> u64 { 3600 }
pub fn default_max_sessions() -> usize { 10_000 }

pub fn default_diabetes_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODELS_DIRECTORY).join("diabetes.json")
}
pub fn default_heart_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODELS_DIRECTORY).join("heart.json")
}
pub fn default_kidney_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODELS_DIRECTORY).join("kidney.json")
}
