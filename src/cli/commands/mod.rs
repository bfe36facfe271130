//! CLI command implementations.

pub mod launch_config;
pub mod repos;
#[cfg(unix)]
pub mod run;
#[cfg(unix)]
pub mod teardown;
