//! The OS process behind a launched application.

use crate::domain::errors::ProcessQueryError;
use crate::domain::ports::AppInstance;

/// One running instance of the application under test.
///
/// Owned by the test that launched it and consumed by teardown.
pub struct ManagedProcess {
    instance: Box<dyn AppInstance>,
}

impl ManagedProcess {
    /// Take ownership of a launched instance.
    pub fn new(instance: impl AppInstance + 'static) -> Self {
        Self {
            instance: Box::new(instance),
        }
    }

    /// Resolve the pid of the backing process.
    pub async fn pid(&self) -> Result<u32, ProcessQueryError> {
        self.instance.pid().await
    }

    /// Request a graceful stop.
    pub async fn stop(&mut self) -> anyhow::Result<()> {
        self.instance.stop().await
    }
}

impl std::fmt::Debug for ManagedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedProcess").finish_non_exhaustive()
    }
}
