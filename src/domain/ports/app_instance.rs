//! Running application instance port.

use async_trait::async_trait;

use crate::domain::errors::ProcessQueryError;

/// A launched application instance.
///
/// The pid is looked up asynchronously because some launchers only learn it
/// after the instance has finished starting.
#[async_trait]
pub trait AppInstance: Send + Sync {
    /// Resolve the OS process id backing this instance.
    async fn pid(&self) -> Result<u32, ProcessQueryError>;

    /// Ask the instance to shut down and wait until it has.
    async fn stop(&mut self) -> anyhow::Result<()>;
}
