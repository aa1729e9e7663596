// server/src/cli/cli.rs

// Top-level CLI entry point: environment, logging, then dispatch.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::commands::{CliArgs, DashboardCommand};
use crate::cli::handlers::{handle_check_models, handle_predict, handle_serve};

/// Installs the fmt subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub async fn start_cli() -> Result<()> {
    let env_file = dotenvy::dotenv().ok();
    init_tracing();
    if let Some(path) = env_file {
        debug!("Loaded environment from {:?}", path);
    }

    let args = CliArgs::parse();
    match args.command() {
        DashboardCommand::Serve(serve) => handle_serve(serve).await,
        DashboardCommand::CheckModels(models) => handle_check_models(models),
        DashboardCommand::Predict(predict) => handle_predict(predict),
    }
}
