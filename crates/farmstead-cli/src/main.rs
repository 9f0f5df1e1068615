//! `farmstead` command-line client.
//!
//! Inspects or watches a decoded player account and prints the farm state:
//! tile readiness, active patterns, and yield projections.
//!
//! # Startup Sequence
//!
//! 1. Parse the command line (`--help` exits here)
//! 2. Load configuration from `farmstead.yaml`
//! 3. Initialize structured logging (tracing)
//! 4. Run the command

mod args;
mod commands;
mod error;

use std::path::Path;

use anyhow::Context as _;
use clap::Parser;
use farmstead_core::clock::SystemClock;
use farmstead_core::config::FarmsteadConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};
use crate::error::CliError;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "farmstead.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading or the command fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = Path::new(CONFIG_FILE);
    let config = load_config(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    if config_path.exists() {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    match cli.command {
        Command::Inspect { account, tile } => {
            let json = commands::inspect(&config, &account, tile.map(usize::from), &SystemClock)
                .with_context(|| format!("inspecting {}", account.display()))?;
            println!("{json}");
        }
        Command::Watch { account } => {
            let account = account.unwrap_or_else(|| config.client.account_path.clone());
            commands::watch(&config, &account)
                .await
                .with_context(|| format!("watching {}", account.display()))?;
        }
    }

    Ok(())
}

/// Load `path` if it exists, otherwise defaults. Environment overrides
/// apply either way.
fn load_config(path: &Path) -> Result<FarmsteadConfig, CliError> {
    if path.exists() {
        Ok(FarmsteadConfig::from_file(path)?)
    } else {
        let mut config = FarmsteadConfig::default();
        config.client.apply_env_overrides();
        Ok(config)
    }
}
