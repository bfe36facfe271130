//! Command-line interface for the e2e harness.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{launch_config::LaunchConfigArgs, repos::ReposArgs};
#[cfg(unix)]
use commands::{run::RunArgs, teardown::TeardownArgs};

/// Top-level arguments.
#[derive(Parser, Debug)]
#[command(name = "e2e-harness")]
#[command(about = "Launch, observe and tear down a desktop app under test", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of .e2e-harness/
    #[arg(short, long, global = true, env = "E2E_HARNESS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the repository listing until it reports entries
    Repos(ReposArgs),
    /// Resolve and print the launch configuration for this platform
    LaunchConfig(LaunchConfigArgs),
    /// Gracefully stop, then SIGKILL, a running process
    #[cfg(unix)]
    Teardown(TeardownArgs),
    /// Launch the application, hold it briefly, then tear it down
    #[cfg(unix)]
    Run(RunArgs),
}

/// Print a failed command's error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        println!(
            "{}",
            serde_json::json!({ "error": err.to_string(), "causes": chain })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
