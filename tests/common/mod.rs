//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use e2e_harness::domain::models::LaunchConfig;

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Launch description for `sh -c <script>`.
#[allow(dead_code)]
pub fn shell_launch(script: &str) -> LaunchConfig {
    LaunchConfig {
        executable_path: PathBuf::from("sh"),
        args: vec!["-c".to_string(), script.to_string()],
        startup_timeout_ms: 1_000,
        ready_timeout_ms: 1_000,
        env: BTreeMap::from([("CICD".to_string(), "true".to_string())]),
    }
}

/// Launch description for a process that idles long enough to be torn down.
#[allow(dead_code)]
pub fn long_running_launch() -> LaunchConfig {
    shell_launch("exec sleep 30")
}

/// Supervisor with real SIGKILL delivery and a short graceful window.
#[cfg(unix)]
#[allow(dead_code)]
pub fn real_supervisor(graceful_timeout_ms: u64) -> e2e_harness::services::LifecycleSupervisor {
    use e2e_harness::domain::models::TeardownConfig;
    use e2e_harness::infrastructure::process::NixSignaller;

    e2e_harness::services::LifecycleSupervisor::new(
        std::sync::Arc::new(NixSignaller),
        &TeardownConfig {
            graceful_timeout_ms,
        },
    )
}

/// Wait for a condition to be true with timeout
///
/// Polls the predicate every 50ms until it returns true or timeout is reached.
#[allow(dead_code)]
pub async fn wait_for<F>(mut predicate: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> bool,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);

    while start.elapsed() < timeout {
        if predicate() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    false
}
