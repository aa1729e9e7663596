// server/src/cli/handlers.rs

// Handlers for each dashboard subcommand.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info};

use dashboard_lib::{
    load_dashboard_config, Dashboard, DashboardConfig, DashboardError, ModelPaths, PredictorRegistry, SessionStore,
};
use rest_api::{start_server, AppState};

use crate::cli::commands::{ModelArgs, PredictArgs, ServeArgs};

/// Loads the layered configuration and applies command-line overrides.
pub fn resolve_config(models: &ModelArgs, host: Option<&str>, port: Option<u16>) -> Result<DashboardConfig> {
    let mut config = load_dashboard_config(models.config.as_deref()).context("Failed to load dashboard configuration")?;
    if let Some(dir) = &models.models_dir {
        config.models = ModelPaths::in_dir(dir);
    }
    if let Some(host) = host {
        config.server.host = host.to_string();
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    Ok(config)
}

fn load_models(paths: &ModelPaths) -> Result<PredictorRegistry> {
    PredictorRegistry::load(paths).map_err(|e| {
        error!("Error loading models: {}", e);
        anyhow!("Error loading models: {}", e)
    })
}

pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let config = resolve_config(&args.models, args.host.as_deref(), args.port)?;
    let registry = load_models(&config.models)?;
    let state = AppState::new(Dashboard::new(registry), SessionStore::new(&config.session));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        info!("Ctrl-C received, shutting down dashboard");
    };
    start_server(&config.server, state, shutdown).await
}

pub fn handle_check_models(args: ModelArgs) -> Result<()> {
    let config = resolve_config(&args, None, None)?;
    let registry = load_models(&config.models)?;
    for disease in dashboard_lib::models::Disease::ALL {
        println!(
            "{:<9} {} ({})",
            disease.slug(),
            registry.get(disease).describe(),
            config.models.path_for(disease).display()
        );
    }
    Ok(())
}

/// Returns the result banner, or lists every rejected field and fails.
pub fn run_predict(dashboard: &Dashboard, args: &PredictArgs) -> Result<String> {
    let fields: HashMap<String, String> = args.fields.iter().cloned().collect();
    match dashboard.evaluate(args.disease, &fields) {
        Ok((_, prediction)) => Ok(prediction.message),
        Err(DashboardError::Validation(err)) => {
            for field in err.field_errors() {
                eprintln!("{}", field);
            }
            Err(anyhow!("{}", err))
        }
        Err(e) => Err(e).context(format!("{} prediction failed", args.disease)),
    }
}

pub fn handle_predict(args: PredictArgs) -> Result<()> {
    let config = resolve_config(&args.models, None, None)?;
    let dashboard = Dashboard::new(load_models(&config.models)?);
    println!("{}", run_predict(&dashboard, &args)?);
    Ok(())
}
