//! Forceful termination port.

use crate::domain::errors::TerminationFailure;

/// Sends an unmaskable kill to a pid.
pub trait ProcessSignaller: Send + Sync {
    /// Forcefully terminate `pid`.
    fn kill(&self, pid: u32) -> Result<(), TerminationFailure>;
}
