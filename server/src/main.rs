// server/src/main.rs

// Entry point for the disease prediction dashboard binary.
// Argument parsing and dispatch live in the cli module.

use anyhow::Result;
use dashboard_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    start_cli().await
}
