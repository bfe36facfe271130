//! Infrastructure layer module
//!
//! This module contains the adapters behind the domain ports:
//! - Process launching and signalling (tokio, nix; unix only)
//! - External CLI tool invocation
//! - Platform path resolution
//! - Configuration management
//! - Logging infrastructure

pub mod cli_tool;
pub mod config;
pub mod logging;
pub mod platform;
#[cfg(unix)]
pub mod process;
