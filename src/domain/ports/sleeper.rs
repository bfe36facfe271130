//! Injectable delay.

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the caller for a duration.
///
/// Production code sleeps on the tokio timer; tests substitute a recorder
/// so retry schedules can be asserted without real waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Sleep for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
