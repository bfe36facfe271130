//! `teardown` command: supervise the shutdown of an existing process.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::application::Harness;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{HarnessConfig, ManagedProcess};
use crate::infrastructure::process::PidInstance;
use crate::services::{GracefulOutcome, KillOutcome, TeardownReport};

/// Arguments of `teardown`.
#[derive(Args, Debug)]
pub struct TeardownArgs {
    /// Process id of the application
    pub pid: u32,
}

/// Printable form of a [`TeardownReport`].
#[derive(Debug, Serialize)]
pub struct TeardownOutput {
    /// Pid that was targeted
    pub pid: u32,
    /// How the graceful stop ended
    pub graceful: String,
    /// How the SIGKILL ended
    pub kill: String,
}

impl From<&TeardownReport> for TeardownOutput {
    fn from(report: &TeardownReport) -> Self {
        let graceful = match &report.graceful {
            GracefulOutcome::Stopped => "stopped".to_string(),
            GracefulOutcome::TimedOut => "timed out".to_string(),
            GracefulOutcome::Failed(e) => format!("failed: {e}"),
        };
        let kill = match &report.kill {
            KillOutcome::Killed => "killed".to_string(),
            KillOutcome::AlreadyExited => "already exited".to_string(),
            KillOutcome::Failed(e) => format!("failed: {e}"),
        };
        Self {
            pid: report.pid,
            graceful,
            kill,
        }
    }
}

impl CommandOutput for TeardownOutput {
    fn to_human(&self) -> String {
        format!(
            "Process {}: graceful stop {}, SIGKILL {}",
            self.pid, self.graceful, self.kill
        )
    }
}

/// Tear down a process the harness did not start.
pub async fn execute(args: TeardownArgs, config: HarnessConfig, json_mode: bool) -> Result<()> {
    let harness = Harness::new(config);
    let report = harness
        .teardown(ManagedProcess::new(PidInstance::new(args.pid)))
        .await?;

    output(&TeardownOutput::from(&report), json_mode);
    Ok(())
}
