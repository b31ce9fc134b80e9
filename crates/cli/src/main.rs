//! webstatic - pack the static site and roll it out to the web servers.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webstatic_core::{load_config, load_default_config, validate_config, Config, FailurePolicy};

/// Config file picked up from the working directory when no path is given
const DEFAULT_CONFIG_FILE: &str = "webstatic.toml";

#[derive(Debug, Parser)]
#[command(name = "webstatic")]
#[command(about = "Pack a static site into a timestamped archive and deploy it to web servers")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./webstatic.toml when present)
    #[arg(short, long, global = true, env = "WEBSTATIC_CONFIG")]
    config: Option<PathBuf>,

    /// Deploy to this host instead of the configured ones (repeatable)
    #[arg(long = "host", global = true)]
    hosts: Vec<String>,

    /// Keep deploying to the remaining hosts after one fails
    #[arg(long, global = true)]
    continue_on_error: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pack the content directory into versions/<name>_<timestamp>.tgz
    Pack,

    /// Deploy an existing archive to every host
    Deploy {
        /// Archive to deploy
        archive: PathBuf,

        /// Print the per-host report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pack, then deploy the new archive to every host
    Release {
        /// Print the per-host report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Pack => commands::pack(&config).await,
        Commands::Deploy { archive, json } => commands::deploy(&config, &archive, json).await,
        Commands::Release { json } => commands::release(&config, json).await,
        Commands::Config => commands::show_config(&config),
    }
}

/// Loads the configuration, applies command-line overrides and validates it.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
            load_config(&PathBuf::from(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_FILE))?
        }
        None => load_default_config().context("Failed to load default configuration")?,
    };

    apply_overrides(&mut config, &cli.hosts, cli.continue_on_error);

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, hosts: &[String], continue_on_error: bool) {
    if !hosts.is_empty() {
        config.remote.hosts = hosts.to_vec();
    }
    if continue_on_error {
        config.deploy.on_host_failure = FailurePolicy::ContinueOnError;
    }
}
