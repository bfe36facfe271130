//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::HarnessConfig;

/// Project config file, lowest-priority file source
pub const PROJECT_CONFIG: &str = ".e2e-harness/config.yaml";
/// Local overrides, not meant to be committed
pub const LOCAL_CONFIG: &str = ".e2e-harness/local.yaml";
/// Prefix of environment overrides, nested keys split on `__`
pub const ENV_PREFIX: &str = "E2E_HARNESS_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Application name cannot be empty")]
    EmptyAppName,

    #[error("Poll command cannot be empty")]
    EmptyPollCommand,

    #[error("Invalid retry_delay_ms: {0}. Must be at least 1")]
    InvalidRetryDelay(u64),

    #[error("Invalid graceful_timeout_ms: {0}. Must be at least 1")]
    InvalidGracefulTimeout(u64),

    #[error("Invalid startup_timeout_ms: {0}. Must be at least 1")]
    InvalidStartupTimeout(u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .e2e-harness/config.yaml (project config)
    /// 3. .e2e-harness/local.yaml (local overrides, optional)
    /// 4. Environment variables (E2E_HARNESS_* prefix, highest priority)
    pub fn load() -> Result<HarnessConfig> {
        let config: HarnessConfig = Figment::new()
            .merge(Serialized::defaults(HarnessConfig::default()))
            .merge(Yaml::file(PROJECT_CONFIG))
            .merge(Yaml::file(LOCAL_CONFIG))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<HarnessConfig> {
        let config: HarnessConfig = Figment::new()
            .merge(Serialized::defaults(HarnessConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &HarnessConfig) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.app.name.is_empty() {
            return Err(ConfigError::EmptyAppName);
        }

        if config.app.startup_timeout_ms == 0 {
            return Err(ConfigError::InvalidStartupTimeout(0));
        }

        if config.poll.command.trim().is_empty() {
            return Err(ConfigError::EmptyPollCommand);
        }

        if config.poll.retry_delay_ms == 0 {
            return Err(ConfigError::InvalidRetryDelay(0));
        }

        if config.teardown.graceful_timeout_ms == 0 {
            return Err(ConfigError::InvalidGracefulTimeout(0));
        }

        Ok(())
    }
}
