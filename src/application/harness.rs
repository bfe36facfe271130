//! Harness facade
//!
//! Wires the poller and supervisor to their production adapters so a test
//! suite only needs a [`HarnessConfig`] to launch, observe and tear down the
//! application under test.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::errors::ProcessQueryError;
use crate::domain::models::{HarnessConfig, LaunchConfig, ManagedProcess, RepositoryEntry};
use crate::domain::ports::{CommandRunner, ProcessSignaller, Sleeper};
use crate::infrastructure::platform;
use crate::services::{ConvergencePoller, LifecycleSupervisor, TeardownReport};

/// Production wiring of the harness components.
pub struct Harness {
    config: HarnessConfig,
    poller: ConvergencePoller,
    supervisor: LifecycleSupervisor,
}

impl Harness {
    /// Build a harness with the real shell, timer and signal adapters.
    #[cfg(unix)]
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_ports(
            config,
            Arc::new(crate::infrastructure::cli_tool::ShellCommandRunner),
            Arc::new(crate::domain::ports::TokioSleeper),
            Arc::new(crate::infrastructure::process::NixSignaller),
        )
    }

    /// Build a harness over caller-supplied ports.
    pub fn with_ports(
        config: HarnessConfig,
        runner: Arc<dyn CommandRunner>,
        sleeper: Arc<dyn Sleeper>,
        signaller: Arc<dyn ProcessSignaller>,
    ) -> Self {
        let poller = ConvergencePoller::new(runner, sleeper, config.poll.clone());
        let supervisor = LifecycleSupervisor::new(signaller, &config.teardown);
        Self {
            config,
            poller,
            supervisor,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Repository poller.
    pub const fn poller(&self) -> &ConvergencePoller {
        &self.poller
    }

    /// Process supervisor.
    pub const fn supervisor(&self) -> &LifecycleSupervisor {
        &self.supervisor
    }

    /// Resolve paths, wipe old app state and describe the launch.
    pub fn prepare_launch(&self) -> Result<LaunchConfig> {
        platform::prepare_launch(&self.config.app).context("Failed to prepare application launch")
    }

    /// Start the application described by `launch`.
    #[cfg(unix)]
    pub async fn launch(&self, launch: &LaunchConfig) -> Result<ManagedProcess> {
        let app = crate::infrastructure::process::SpawnedApp::launch(launch)
            .await
            .context("Failed to launch application under test")?;
        Ok(ManagedProcess::new(app))
    }

    /// Prepare and launch in one step.
    #[cfg(unix)]
    pub async fn start(&self) -> Result<ManagedProcess> {
        let launch = self.prepare_launch()?;
        tracing::info!(path = ?launch.executable_path, "Starting application under test");
        self.launch(&launch).await
    }

    /// See [`LifecycleSupervisor::teardown`].
    pub async fn teardown(&self, process: ManagedProcess) -> Result<TeardownReport, ProcessQueryError> {
        self.supervisor.teardown(process).await
    }

    /// See [`ConvergencePoller::list_entries`].
    pub async fn list_repositories(&self) -> Vec<RepositoryEntry> {
        self.poller.list_entries().await
    }
}
