// lib/src/config/mod.rs

//! Layered configuration: built-in defaults, then an optional
//! `dashboard.{toml,yaml,json}` file, then `DASHBOARD__SECTION__KEY`
//! environment variables.

pub mod config_defaults;
pub mod config_structs;

use std::path::Path;

use config::{Config, Environment, File};
use tracing::{debug, info};

pub use config_defaults::*;
pub use config_structs::{DashboardConfig, ModelPaths, ServerConfig, SessionConfig};

use crate::errors::DashboardResult;

/// Loads the dashboard configuration.
///
/// With `path` the file must exist; without it `dashboard.*` in the working
/// directory is used when present.
pub fn load_dashboard_config(path: Option<&Path>) -> DashboardResult<DashboardConfig> {
    let env = Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);
    load_dashboard_config_with_env(path, env)
}

pub(crate) fn load_dashboard_config_with_env(
    path: Option<&Path>,
    env: Environment,
) -> DashboardResult<DashboardConfig> {
    let file = match path {
        Some(path) => {
            info!("Loading dashboard configuration from {:?}", path);
            File::from(path).required(true)
        }
        None => File::with_name(DEFAULT_CONFIG_FILE_STEM).required(false),
    };

    let settings = Config::builder()
        .add_source(Config::try_from(&DashboardConfig::default())?)
        .add_source(file)
        .add_source(env)
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    debug!("Effective dashboard configuration: {:?}", config);
    Ok(config)
}
