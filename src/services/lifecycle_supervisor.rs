//! Lifecycle supervisor for launched application processes.
//!
//! Teardown always ends with a SIGKILL to the resolved pid, even after a clean
//! graceful stop. The kill is idempotent, so a process that already exited
//! only produces a "no such process" that is logged and dropped.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::ProcessQueryError;
use crate::domain::models::{ManagedProcess, TeardownConfig};
use crate::domain::ports::ProcessSignaller;

/// How the graceful stop request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GracefulOutcome {
    /// The instance acknowledged the stop
    Stopped,
    /// The stop request returned an error
    Failed(String),
    /// The instance did not finish stopping in time
    TimedOut,
}

/// How the forceful kill ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    /// The signal was delivered
    Killed,
    /// No process with that pid was left to kill
    ///
    /// Once the graceful stop has reaped the process its pid is free for the
    /// kernel to reuse, so the kill is sent as soon as the stop returns.
    AlreadyExited,
    /// Delivery failed for another reason
    Failed(String),
}

/// What teardown did to one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    /// Pid that was targeted
    pub pid: u32,
    /// Result of the graceful stop
    pub graceful: GracefulOutcome,
    /// Result of the forceful kill
    pub kill: KillOutcome,
}

/// Guarantees launched processes are dead when a test tears down.
pub struct LifecycleSupervisor {
    signaller: Arc<dyn ProcessSignaller>,
    graceful_timeout: Duration,
}

impl LifecycleSupervisor {
    /// Create a supervisor that kills through `signaller`.
    pub fn new(signaller: Arc<dyn ProcessSignaller>, config: &TeardownConfig) -> Self {
        Self {
            signaller,
            graceful_timeout: Duration::from_millis(config.graceful_timeout_ms),
        }
    }

    /// Stop `process` gracefully, then kill its pid unconditionally.
    ///
    /// Fails only when the pid cannot be resolved, in which case nothing is
    /// stopped or signalled. Stop failures, stop timeouts and kill failures
    /// are logged and reported, never returned as errors.
    #[instrument(skip_all)]
    pub async fn teardown(
        &self,
        mut process: ManagedProcess,
    ) -> Result<TeardownReport, ProcessQueryError> {
        let pid = process.pid().await?;
        info!(pid, "Tearing down application process");

        let graceful = match tokio::time::timeout(self.graceful_timeout, process.stop()).await {
            Ok(Ok(())) => {
                debug!(pid, "Application stopped gracefully");
                GracefulOutcome::Stopped
            }
            Ok(Err(e)) => {
                warn!(pid, error = %e, "Graceful stop failed, killing");
                GracefulOutcome::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    pid,
                    timeout = ?self.graceful_timeout,
                    "Graceful stop timed out, killing"
                );
                GracefulOutcome::TimedOut
            }
        };

        // The pid may already be reaped and free for reuse. Nothing is awaited
        // between the stop returning and this kill.
        let kill = match self.signaller.kill(pid) {
            Ok(()) => {
                info!(pid, "Sent SIGKILL to application process");
                KillOutcome::Killed
            }
            Err(e) if e.is_already_exited() => {
                debug!(pid, "Process already exited before SIGKILL");
                KillOutcome::AlreadyExited
            }
            Err(e) => {
                warn!(pid, error = %e, "Failed to kill application process");
                KillOutcome::Failed(e.to_string())
            }
        };

        Ok(TeardownReport {
            pid,
            graceful,
            kill,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        CallLog, MockAppInstance, RecordingSignaller, StopBehavior,
    };
    use crate::domain::errors::TerminationFailure;

    fn supervisor(signaller: RecordingSignaller) -> LifecycleSupervisor {
        LifecycleSupervisor::new(
            Arc::new(signaller),
            &TeardownConfig {
                graceful_timeout_ms: 50,
            },
        )
    }

    #[tokio::test]
    async fn test_stop_then_kill() {
        let log = CallLog::new();
        let process = ManagedProcess::new(MockAppInstance::new(4242, log.clone()));

        let report = supervisor(RecordingSignaller::new(log.clone()))
            .teardown(process)
            .await
            .unwrap();

        assert_eq!(log.calls(), vec!["pid", "stop", "kill:4242"]);
        assert_eq!(
            report,
            TeardownReport {
                pid: 4242,
                graceful: GracefulOutcome::Stopped,
                kill: KillOutcome::Killed,
            }
        );
    }

    #[tokio::test]
    async fn test_pid_query_failure_propagates_without_kill() {
        let log = CallLog::new();
        let process = ManagedProcess::new(MockAppInstance::failing_pid(
            ProcessQueryError::Unavailable("main process gone".into()),
            log.clone(),
        ));

        let result = supervisor(RecordingSignaller::new(log.clone()))
            .teardown(process)
            .await;

        assert_eq!(
            result,
            Err(ProcessQueryError::Unavailable("main process gone".into()))
        );
        assert_eq!(log.calls(), vec!["pid"]);
    }

    #[tokio::test]
    async fn test_already_exited_is_absorbed() {
        let log = CallLog::new();
        let process = ManagedProcess::new(MockAppInstance::new(7, log.clone()));
        let signaller =
            RecordingSignaller::failing(TerminationFailure::NoSuchProcess { pid: 7 }, log.clone());

        let report = supervisor(signaller).teardown(process).await.unwrap();

        assert_eq!(report.kill, KillOutcome::AlreadyExited);
    }

    #[tokio::test]
    async fn test_kill_failure_is_absorbed() {
        let log = CallLog::new();
        let process = ManagedProcess::new(MockAppInstance::new(1, log.clone()));
        let signaller =
            RecordingSignaller::failing(TerminationFailure::PermissionDenied { pid: 1 }, log.clone());

        let report = supervisor(signaller).teardown(process).await.unwrap();

        assert!(matches!(report.kill, KillOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_failed_stop_still_kills() {
        let log = CallLog::new();
        let process = ManagedProcess::new(
            MockAppInstance::new(99, log.clone())
                .with_stop(StopBehavior::Fail("renderer crashed".into())),
        );

        let report = supervisor(RecordingSignaller::new(log.clone()))
            .teardown(process)
            .await
            .unwrap();

        assert_eq!(report.graceful, GracefulOutcome::Failed("renderer crashed".into()));
        assert_eq!(log.calls(), vec!["pid", "stop", "kill:99"]);
    }

    #[tokio::test]
    async fn test_hung_stop_times_out_and_kills() {
        let log = CallLog::new();
        let process = ManagedProcess::new(
            MockAppInstance::new(5, log.clone()).with_stop(StopBehavior::Hang),
        );

        let report = supervisor(RecordingSignaller::new(log.clone()))
            .teardown(process)
            .await
            .unwrap();

        assert_eq!(report.graceful, GracefulOutcome::TimedOut);
        assert_eq!(report.kill, KillOutcome::Killed);
        assert_eq!(log.calls(), vec!["pid", "stop", "kill:5"]);
    }
}
