//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters must implement:
//! - AppInstance: a launched application (pid lookup, graceful stop)
//! - CommandRunner: external command invocation
//! - ProcessSignaller: forceful OS-level termination
//! - Sleeper: injectable delay between retries
//!
//! Services depend only on these traits, so tests can drive them with
//! scripted doubles instead of real processes and timers.

pub mod app_instance;
pub mod command_runner;
pub mod process_signaller;
pub mod sleeper;

pub use app_instance::AppInstance;
pub use command_runner::{CommandOutput, CommandRunner};
pub use process_signaller::ProcessSignaller;
pub use sleeper::{Sleeper, TokioSleeper};
