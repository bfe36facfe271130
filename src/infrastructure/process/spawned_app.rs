//! Application instances backed by real OS processes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use nix::sys::signal::Signal;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use super::signal::{has_exited, is_alive, send_signal};
use crate::domain::errors::{LaunchError, ProcessQueryError, TerminationFailure};
use crate::domain::models::LaunchConfig;
use crate::domain::ports::AppInstance;

/// Time a fresh process must survive before launch reports success.
const STARTUP_SETTLE: Duration = Duration::from_millis(200);

/// Poll interval while waiting for a foreign process to exit.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// An application started by the harness from a [`LaunchConfig`].
///
/// The child is killed if this value is dropped without a teardown.
pub struct SpawnedApp {
    child: Child,
    pid: u32,
    executable: PathBuf,
}

impl SpawnedApp {
    /// Spawn the application and check that it survives a short settle period.
    ///
    /// The settle period is 200 ms, capped by `startup_timeout_ms`. Waiting for
    /// the application to become usable (`ready_timeout_ms`) is left to the
    /// caller driving its UI.
    pub async fn launch(config: &LaunchConfig) -> Result<Self, LaunchError> {
        info!(
            path = ?config.executable_path,
            args = ?config.args,
            "Launching application"
        );

        let mut child = Command::new(&config.executable_path)
            .args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                LaunchError::Spawn(format!("{}: {e}", config.executable_path.display()))
            })?;

        let pid = child.id().ok_or(LaunchError::MissingPid)?;

        tokio::time::sleep(STARTUP_SETTLE.min(config.startup_timeout())).await;
        if let Some(status) = child
            .try_wait()
            .map_err(|e| LaunchError::Spawn(e.to_string()))?
        {
            return Err(LaunchError::ExitedDuringStartup {
                code: status.code(),
            });
        }

        info!(pid, "Application launched");
        Ok(Self {
            child,
            pid,
            executable: config.executable_path.clone(),
        })
    }
}

#[async_trait]
impl AppInstance for SpawnedApp {
    async fn pid(&self) -> Result<u32, ProcessQueryError> {
        // id() goes away once the child has been reaped
        self.child
            .id()
            .ok_or(ProcessQueryError::Exited { pid: self.pid })
    }

    async fn stop(&mut self) -> Result<()> {
        debug!(pid = self.pid, executable = ?self.executable, "Sending SIGTERM");
        match send_signal(self.pid, Some(Signal::SIGTERM)) {
            Ok(()) | Err(TerminationFailure::NoSuchProcess { .. }) => {}
            Err(e) => return Err(e).context("Failed to request application shutdown"),
        }

        let status = self
            .child
            .wait()
            .await
            .context("Failed waiting for application to exit")?;
        info!(pid = self.pid, ?status, "Application exited");
        Ok(())
    }
}

/// A process the harness did not spawn, known only by pid.
#[derive(Debug, Clone, Copy)]
pub struct PidInstance {
    pid: u32,
}

impl PidInstance {
    /// Wrap an existing pid.
    pub const fn new(pid: u32) -> Self {
        Self { pid }
    }
}

#[async_trait]
impl AppInstance for PidInstance {
    async fn pid(&self) -> Result<u32, ProcessQueryError> {
        if is_alive(self.pid) {
            Ok(self.pid)
        } else {
            Err(ProcessQueryError::NotRunning { pid: self.pid })
        }
    }

    async fn stop(&mut self) -> Result<()> {
        match send_signal(self.pid, Some(Signal::SIGTERM)) {
            Ok(()) => {}
            Err(TerminationFailure::NoSuchProcess { .. }) => return Ok(()),
            Err(e) => return Err(e).context("Failed to request process shutdown"),
        }

        while !has_exited(self.pid) {
            tokio::time::sleep(EXIT_POLL_INTERVAL).await;
        }
        info!(pid = self.pid, "Process exited");
        Ok(())
    }
}
