//! Harness domain models.

pub mod config;
pub mod launch;
pub mod process;
pub mod repository;

pub use config::{
    AppConfig, HarnessConfig, LoggingConfig, PollConfig, TeardownConfig, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY_MS,
};
pub use launch::{AppTestingPaths, LaunchConfig};
pub use process::ManagedProcess;
pub use repository::{entries_by_name, parse_entries, RepositoryEntry};
