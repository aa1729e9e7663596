// lib/src/config/config_structs.rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use models::Disease;

use crate::config::config_defaults::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where each disease's serialized model lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPaths {
    #[serde(default = "default_diabetes_model_path")]
    pub diabetes: PathBuf,
    #[serde(default = "default_heart_model_path")]
    pub heart: PathBuf,
    #[serde(default = "default_kidney_model_path")]
    pub kidney: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            diabetes: default_diabetes_model_path(),
            heart: default_heart_model_path(),
            kidney: default_kidney_model_path(),
        }
    }
}

impl ModelPaths {
    /// `<dir>/diabetes.json`, `<dir>/heart.json`, `<dir>/kidney.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            diabetes: dir.join("diabetes.json"),
            heart: dir.join("heart.json"),
            kidney: dir.join("kidney.json"),
        }
    }

    pub fn path_for(&self, disease: Disease) -> &Path {
        match disease {
            Disease::Diabetes => &self.diabetes,
            Disease::Heart => &self.heart,
            Disease::Kidney => &self.kidney,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are dropped.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelPaths,
    #[serde(default)]
    pub session: SessionConfig,
}
