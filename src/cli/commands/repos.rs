//! `repos` command: poll the repository listing.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::cli::output::{output, repository_table, CommandOutput};
use crate::domain::models::{HarnessConfig, RepositoryEntry};
use crate::domain::ports::TokioSleeper;
use crate::infrastructure::cli_tool::ShellCommandRunner;
use crate::services::{ConvergencePoller, PollReport};

/// Arguments of `repos`.
#[derive(Args, Debug)]
pub struct ReposArgs {
    /// Retries after the first attempt (defaults to poll.max_retries)
    #[arg(short, long)]
    pub max_retries: Option<u32>,

    /// Listing command (defaults to poll.command)
    #[arg(long)]
    pub command: Option<String>,

    /// Stop at once when the listing tool cannot be spawned
    #[arg(long)]
    pub fail_fast: bool,
}

/// Result of one `repos` run.
#[derive(Debug, Serialize)]
pub struct RepositoryListOutput {
    /// Entries reported by the tool, empty if it never converged
    pub repositories: Vec<RepositoryEntry>,
    /// Whether any entries were reported
    pub converged: bool,
    /// Times the listing command ran
    pub invocations: u32,
    /// Failure of the final attempt, if any
    pub last_error: Option<String>,
}

impl From<PollReport> for RepositoryListOutput {
    fn from(report: PollReport) -> Self {
        Self {
            converged: report.is_converged(),
            invocations: report.invocations,
            last_error: report.last_error.map(|e| e.to_string()),
            repositories: report.entries,
        }
    }
}

impl CommandOutput for RepositoryListOutput {
    fn to_human(&self) -> String {
        if self.repositories.is_empty() {
            let mut msg = format!(
                "No repositories found after {} attempt(s).",
                self.invocations
            );
            if let Some(ref err) = self.last_error {
                msg.push_str(&format!("\nLast error: {err}"));
            }
            return msg;
        }

        format!(
            "{}\n{} repositor{} after {} attempt(s)",
            repository_table(&self.repositories),
            self.repositories.len(),
            if self.repositories.len() == 1 { "y" } else { "ies" },
            self.invocations
        )
    }
}

/// Poll the listing command and print what it reports.
pub async fn execute(args: ReposArgs, mut config: HarnessConfig, json_mode: bool) -> Result<()> {
    if let Some(command) = args.command {
        config.poll.command = command;
    }
    if args.fail_fast {
        config.poll.fail_fast_on_missing_tool = true;
    }
    let max_retries = args.max_retries.unwrap_or(config.poll.max_retries);

    let poller = ConvergencePoller::new(
        Arc::new(ShellCommandRunner),
        Arc::new(TokioSleeper),
        config.poll,
    );
    let report = poller.poll(max_retries).await;

    output(&RepositoryListOutput::from(report), json_mode);
    Ok(())
}
