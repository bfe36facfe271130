//! Domain layer for the e2e harness
//!
//! This module contains the harness models, error taxonomy and port traits.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{
    InvocationError, LaunchError, ParseError, PlatformError, PollError, ProcessQueryError,
    TerminationFailure,
};
