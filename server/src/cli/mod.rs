// server/src/cli/mod.rs

// Command-line front end: argument definitions, command handlers and the
// top-level dispatcher.

pub mod cli;
pub mod commands;
pub mod handlers;

pub use cli::{init_tracing, start_cli};
pub use commands::{CliArgs, DashboardCommand, ModelArgs, PredictArgs, ServeArgs};
pub use handlers::{handle_check_models, handle_predict, handle_serve, resolve_config, run_predict};
