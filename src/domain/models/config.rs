//! Harness configuration, loaded by the config loader.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for the harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarnessConfig {
    /// Application under test
    #[serde(default)]
    pub app: AppConfig,

    /// Repository listing poller
    #[serde(default)]
    pub poll: PollConfig,

    /// Process teardown
    #[serde(default)]
    pub teardown: TeardownConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application under test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    /// Product name, used for the macOS bundle, the Windows executable and
    /// the per-user config directory
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Executable name inside the unpacked Linux build
    #[serde(default = "default_linux_binary")]
    pub linux_binary: String,

    /// Use this executable instead of the per-platform build output
    #[serde(default)]
    pub executable_override: Option<PathBuf>,

    /// Extra arguments passed to the application
    #[serde(default)]
    pub args: Vec<String>,

    /// How long the launcher waits for the process to come up
    #[serde(default = "default_startup_timeout_ms")]
    pub startup_timeout_ms: u64,

    /// How long a test may wait for the UI to become ready
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,

    /// Environment added to the application's environment
    #[serde(default = "default_app_env")]
    pub env: BTreeMap<String, String>,
}

fn default_app_name() -> String {
    "Lens".to_string()
}

fn default_linux_binary() -> String {
    "kontena-lens".to_string()
}

const fn default_startup_timeout_ms() -> u64 {
    30_000
}

const fn default_ready_timeout_ms() -> u64 {
    60_000
}

fn default_app_env() -> BTreeMap<String, String> {
    BTreeMap::from([("CICD".to_string(), "true".to_string())])
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            linux_binary: default_linux_binary(),
            executable_override: None,
            args: Vec::new(),
            startup_timeout_ms: default_startup_timeout_ms(),
            ready_timeout_ms: default_ready_timeout_ms(),
            env: default_app_env(),
        }
    }
}

/// Repository listing poller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollConfig {
    /// Shell command printing a JSON array of `{name, url}` records
    #[serde(default = "default_poll_command")]
    pub command: String,

    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Give up at once when the tool cannot be spawned at all
    #[serde(default)]
    pub fail_fast_on_missing_tool: bool,
}

fn default_poll_command() -> String {
    "helm repo list -o json".to_string()
}

/// Default retry budget for repository polling
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default delay between poll attempts
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

const fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            command: default_poll_command(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            fail_fast_on_missing_tool: false,
        }
    }
}

/// Process teardown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TeardownConfig {
    /// Upper bound on waiting for a graceful stop before the kill
    #[serde(default = "default_graceful_timeout_ms")]
    pub graceful_timeout_ms: u64,
}

const fn default_graceful_timeout_ms() -> u64 {
    10_000
}

impl Default for TeardownConfig {
    fn default() -> Self {
        Self {
            graceful_timeout_ms: default_graceful_timeout_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "never".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
