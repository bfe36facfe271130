//! e2e-harness CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use e2e_harness::cli::{commands, Cli, Commands};
use e2e_harness::domain::models::HarnessConfig;
use e2e_harness::infrastructure::config::ConfigLoader;
use e2e_harness::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> Result<HarnessConfig> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => ConfigLoader::load().context("Failed to load configuration"),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let log_config = LogConfig::try_from(&config.logging)?;
    // Held for the process lifetime so the file appender keeps flushing.
    let _logger = LoggerImpl::init(&log_config)?;

    let json = cli.json;
    match cli.command {
        Commands::Repos(args) => commands::repos::execute(args, config, json).await,
        Commands::LaunchConfig(args) => commands::launch_config::execute(&args, &config, json),
        #[cfg(unix)]
        Commands::Teardown(args) => commands::teardown::execute(args, config, json).await,
        #[cfg(unix)]
        Commands::Run(args) => commands::run::execute(args, config, json).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        e2e_harness::cli::handle_error(err, json);
    }
}
