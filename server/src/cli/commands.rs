// server/src/cli/commands.rs

// Command-line arguments and subcommands for the dashboard binary,
// defined with `clap` derive.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dashboard_lib::models::Disease;

#[derive(Parser, Debug)]
#[command(name = "disease-dashboard")]
#[command(version)]
#[command(about = "Multiple disease prediction dashboard")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<DashboardCommand>,
}

impl CliArgs {
    /// `serve` with default arguments when no subcommand is given.
    pub fn command(self) -> DashboardCommand {
        self.command.unwrap_or(DashboardCommand::Serve(ServeArgs::default()))
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum DashboardCommand {
    /// Run the web dashboard
    Serve(ServeArgs),
    /// Load the three models and describe them
    CheckModels(ModelArgs),
    /// Run one prediction from KEY=VALUE fields
    Predict(PredictArgs),
}

/// Options shared by every command that loads models.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ModelArgs {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Directory holding diabetes.json, heart.json and kidney.json
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ServeArgs {
    #[command(flatten)]
    pub models: ModelArgs,
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,
    #[arg(long, short = 'p', value_name = "PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    #[command(flatten)]
    pub models: ModelArgs,
    /// diabetes, heart or kidney
    #[arg(long)]
    pub disease: Disease,
    /// A form value, repeatable: --field Glucose=148
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
