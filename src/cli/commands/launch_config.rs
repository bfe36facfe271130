//! `launch-config` command: resolve the launch description.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{HarnessConfig, LaunchConfig};
use crate::infrastructure::platform;

/// Arguments of `launch-config`.
#[derive(Args, Debug)]
pub struct LaunchConfigArgs {
    /// Do not delete the application's existing config directory
    #[arg(long)]
    pub keep_library: bool,
}

/// Printable form of a [`LaunchConfig`].
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct LaunchConfigOutput(pub LaunchConfig);

impl CommandOutput for LaunchConfigOutput {
    fn to_human(&self) -> String {
        let config = &self.0;
        let mut lines = vec![
            format!("Executable:      {}", config.executable_path.display()),
            format!("Arguments:       {}", config.args.join(" ")),
            format!("Startup timeout: {} ms", config.startup_timeout_ms),
            format!("Ready timeout:   {} ms", config.ready_timeout_ms),
            "Environment:".to_string(),
        ];
        lines.extend(config.env.iter().map(|(k, v)| format!("  {k}={v}")));
        lines.join("\n")
    }
}

/// Resolve the launch configuration and print it.
pub fn execute(args: &LaunchConfigArgs, config: &HarnessConfig, json_mode: bool) -> Result<()> {
    let launch = if args.keep_library {
        platform::prepare_launch_keep_library(&config.app)
    } else {
        platform::prepare_launch(&config.app)
    }
    .context("Failed to resolve launch configuration")?;

    output(&LaunchConfigOutput(launch), json_mode);
    Ok(())
}
