//! Launch description of the application under test.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Everything an application launcher needs to start one instance.
///
/// Serialised with camelCase keys so external runners can consume it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfig {
    /// Executable to start
    pub executable_path: PathBuf,
    /// Command-line arguments
    #[serde(rename = "arguments")]
    pub args: Vec<String>,
    /// Bound on bringing the process up
    pub startup_timeout_ms: u64,
    /// Bound on waiting for the application to become ready, for the caller
    /// driving its UI; the launcher itself only uses the startup bound
    pub ready_timeout_ms: u64,
    /// Variables added to the inherited environment
    #[serde(rename = "environment")]
    pub env: BTreeMap<String, String>,
}

#[allow(missing_docs)]
impl LaunchConfig {
    pub const fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    pub const fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }
}

/// Where the unpacked build lives and where it keeps per-user state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTestingPaths {
    /// Executable produced by the packaging step
    pub testing_path: PathBuf,
    /// Per-user config directory, wiped before each run
    pub library_path: PathBuf,
}
