//! Convergence poller for externally-managed repository state.
//!
//! The application under test registers package repositories in the
//! background, and the only way to observe that is to ask the CLI tool again
//! until it reports something. The poller owns that loop: a fixed delay
//! between attempts, a hard attempt budget, and no error past its boundary.

use backoff::backoff::{Backoff, Constant};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::errors::PollError;
use crate::domain::models::{parse_entries, PollConfig, RepositoryEntry};
use crate::domain::ports::{CommandRunner, Sleeper};

/// Outcome of one [`ConvergencePoller::poll`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    /// Parsed entries, empty when the budget ran out
    pub entries: Vec<RepositoryEntry>,
    /// Times the command was invoked
    pub invocations: u32,
    /// Retries consumed, which equals the number of delays slept
    pub retries: u32,
    /// Failure of the final attempt when nothing converged
    pub last_error: Option<PollError>,
}

impl PollReport {
    /// True when the poll returned real data.
    pub fn is_converged(&self) -> bool {
        !self.entries.is_empty()
    }
}

/// Polls the repository listing command until it reports entries.
pub struct ConvergencePoller {
    runner: Arc<dyn CommandRunner>,
    sleeper: Arc<dyn Sleeper>,
    config: PollConfig,
}

impl ConvergencePoller {
    /// Create a poller over the given ports.
    pub fn new(runner: Arc<dyn CommandRunner>, sleeper: Arc<dyn Sleeper>, config: PollConfig) -> Self {
        Self {
            runner,
            sleeper,
            config,
        }
    }

    /// Configured delay between attempts.
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.config.retry_delay_ms)
    }

    /// List entries using the configured retry budget.
    pub async fn list_entries(&self) -> Vec<RepositoryEntry> {
        self.list_entries_with_budget(self.config.max_retries).await
    }

    /// List entries, retrying at most `max_retries` times.
    ///
    /// Returns an empty vec once the budget is exhausted; that is a normal
    /// outcome, not an error.
    pub async fn list_entries_with_budget(&self, max_retries: u32) -> Vec<RepositoryEntry> {
        self.poll(max_retries).await.entries
    }

    /// Run the bounded poll loop and report how it went.
    ///
    /// Makes at most `max_retries + 1` invocations and sleeps only between
    /// attempts, never after the last one.
    pub async fn poll(&self, max_retries: u32) -> PollReport {
        let mut schedule = Constant::new(self.retry_delay());
        let mut retries: u32 = 0;

        loop {
            match self.attempt().await {
                Ok(entries) => {
                    if retries > 0 {
                        debug!(retries, "Repository listing converged after retries");
                    }
                    info!(count = entries.len(), "Repository listing available");
                    return PollReport {
                        entries,
                        invocations: retries + 1,
                        retries,
                        last_error: None,
                    };
                }
                Err(err) => {
                    if retries >= max_retries {
                        warn!(
                            attempts = retries + 1,
                            error = %err,
                            "Repository listing did not converge, returning empty result"
                        );
                        return Self::exhausted(retries, err);
                    }

                    if self.config.fail_fast_on_missing_tool && err.is_missing_tool() {
                        error!(
                            command = %self.config.command,
                            error = %err,
                            "Repository tool unavailable, not retrying"
                        );
                        return Self::exhausted(retries, err);
                    }

                    let delay = schedule.next_backoff().unwrap_or_else(|| self.retry_delay());
                    debug!(
                        attempt = retries + 1,
                        max_retries,
                        ?delay,
                        error = %err,
                        "Repository listing not ready, retrying"
                    );

                    self.sleeper.sleep(delay).await;
                    retries += 1;
                }
            }
        }
    }

    async fn attempt(&self) -> Result<Vec<RepositoryEntry>, PollError> {
        let output = self.runner.run(&self.config.command).await?;
        Ok(parse_entries(&output.stdout)?)
    }

    fn exhausted(retries: u32, err: PollError) -> PollReport {
        PollReport {
            entries: Vec::new(),
            invocations: retries + 1,
            retries,
            last_error: Some(err),
        }
    }
}
