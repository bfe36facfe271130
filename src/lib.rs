//! e2e-harness - lifecycle and convergence helpers for desktop e2e suites
//!
//! Launches the application under test, tears it down reliably (graceful stop
//! followed by an unconditional SIGKILL) and polls an external CLI until its
//! repository listing converges.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the ports the services depend on
//! - **Service Layer** (`services`): the convergence poller, the lifecycle supervisor and test gating
//! - **Infrastructure Layer** (`infrastructure`): shell, signal, platform, config and logging adapters
//! - **Application Layer** (`application`): the [`Harness`] facade wiring it all together
//! - **Adapters** (`adapters`): in-memory port implementations for tests
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use e2e_harness::{ConfigLoader, Harness};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let harness = Harness::new(ConfigLoader::load()?);
//!     let app = harness.start().await?;
//!     let repos = harness.list_repositories().await;
//!     harness.teardown(app).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::Harness;
pub use domain::models::{
    HarnessConfig, LaunchConfig, ManagedProcess, PollConfig, RepositoryEntry, TeardownConfig,
};
pub use domain::ports::{AppInstance, CommandRunner, ProcessSignaller, Sleeper};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    describe_if, it_if, ConvergencePoller, Gate, LifecycleSupervisor, PollReport, TeardownReport,
};
