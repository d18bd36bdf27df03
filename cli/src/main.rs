// Copyright (c) 2026 Franchise Inventory Maintainers
// SPDX-License-Identifier: AGPL-3.0

//! # Franchise Inventory Daemon
//!
//! The `franchised` binary serves the franchise inventory HTTP API.
//!
//! ## Commands
//!
//! - `franchised serve` - Run the HTTP API (default when no command is given)
//! - `franchised config show|validate|generate` - Configuration management
//! - `franchised migrate [--dry-run]` - Apply PostgreSQL schema migrations
//!
//! Configuration is read from `--config` / `FRANCHISE_CONFIG_PATH`, then
//! `./franchise-config.yaml`, then built-in defaults. Host, port and log
//! level flags override the file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use franchise_core::domain::service_config::{LogFormat, ServiceConfig};
use franchise_inventory::commands::{self, ConfigCommand, MigrateCommand};
use franchise_inventory::server;

/// Franchise inventory service
#[derive(Parser)]
#[command(name = "franchised")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "FRANCHISE_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP API host (overrides server.host)
    #[arg(long, global = true, env = "FRANCHISE_HOST")]
    host: Option<String>,

    /// HTTP API port (overrides server.port)
    #[arg(long, global = true, env = "FRANCHISE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "FRANCHISE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Apply database schema migrations
    #[command(name = "migrate")]
    Migrate {
        #[command(flatten)]
        command: MigrateCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ServiceConfig::load_or_default(cli.config.clone())
        .context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config.logging.level, config.logging.format)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting franchise inventory service");
            server::start_server(config).await
        }
        Commands::Config { command } => commands::config::handle_command(command, &config, cli.config).await,
        Commands::Migrate { command } => commands::migrate::execute(command, &config).await,
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }

    Ok(())
}
