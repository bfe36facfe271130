//! Mock adapters for testing.
//!
//! Scripted stand-ins for every port, recording what the services asked of
//! them so tests can assert on attempt counts, delays and call order.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::errors::{InvocationError, ProcessQueryError, TerminationFailure};
use crate::domain::ports::{AppInstance, CommandOutput, CommandRunner, ProcessSignaller, Sleeper};

/// Shared, ordered record of calls across several mocks.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one call.
    pub fn record(&self, call: impl Into<String>) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call.into());
        }
    }

    /// Calls so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

/// Command runner that replays a fixed script of outcomes.
///
/// Once the script runs out the last outcome repeats, so "always fails" is a
/// one-element script.
pub struct ScriptedCommandRunner {
    script: Mutex<VecDeque<Result<CommandOutput, InvocationError>>>,
    last: Mutex<Option<Result<CommandOutput, InvocationError>>>,
    invocations: Mutex<Vec<String>>,
}

impl ScriptedCommandRunner {
    /// Replay `script`, repeating its last outcome once exhausted.
    pub fn new(script: Vec<Result<CommandOutput, InvocationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Fail `failures` times with a non-zero exit, then print `stdout`.
    pub fn fail_then_succeed(failures: usize, stdout: impl Into<String>) -> Self {
        let mut script: Vec<_> = (0..failures).map(|_| Err(no_repositories())).collect();
        script.push(Ok(CommandOutput::stdout(stdout)));
        Self::new(script)
    }

    /// Fail every invocation with `err`.
    pub fn always_failing(err: InvocationError) -> Self {
        Self::new(vec![Err(err)])
    }

    /// Print `stdout` on every invocation.
    pub fn always(stdout: impl Into<String>) -> Self {
        Self::new(vec![Ok(CommandOutput::stdout(stdout))])
    }

    /// Number of runs.
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().map(|i| i.len()).unwrap_or_default()
    }

    /// Command lines received.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().map(|i| i.clone()).unwrap_or_default()
    }
}

/// The error `helm repo list` reports before any repository is registered.
pub fn no_repositories() -> InvocationError {
    InvocationError::NonZeroExit {
        command: "helm repo list -o json".to_string(),
        code: Some(1),
        stderr: "Error: no repositories to show".to_string(),
    }
}

#[async_trait]
impl CommandRunner for ScriptedCommandRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, InvocationError> {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.push(command.to_string());
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let mut last = self
            .last
            .lock()
            .map_err(|e| InvocationError::Io(e.to_string()))?;

        match next {
            Some(outcome) => {
                *last = Some(outcome.clone());
                outcome
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(InvocationError::Io("empty script".to_string()))),
        }
    }
}

/// Sleeper that returns immediately and remembers what it was asked.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Sleeper with no recorded delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested delays, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Sum of all requested delays.
    pub fn total(&self) -> Duration {
        self.delays().iter().sum()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(duration);
        }
    }
}

/// How a [`MockAppInstance`] reacts to a stop request.
#[derive(Debug, Clone)]
pub enum StopBehavior {
    /// Stop returns `Ok`
    Succeed,
    /// Stop returns this error
    Fail(String),
    /// Stop never completes
    Hang,
}

/// Application instance with scripted pid lookup and stop.
pub struct MockAppInstance {
    pid: Result<u32, ProcessQueryError>,
    stop: StopBehavior,
    log: CallLog,
}

impl MockAppInstance {
    /// Instance with `pid` that stops cleanly.
    pub fn new(pid: u32, log: CallLog) -> Self {
        Self {
            pid: Ok(pid),
            stop: StopBehavior::Succeed,
            log,
        }
    }

    /// Instance whose pid lookup fails with `err`.
    pub fn failing_pid(err: ProcessQueryError, log: CallLog) -> Self {
        Self {
            pid: Err(err),
            stop: StopBehavior::Succeed,
            log,
        }
    }

    /// Replace the stop behaviour.
    #[must_use]
    pub fn with_stop(mut self, stop: StopBehavior) -> Self {
        self.stop = stop;
        self
    }
}

#[async_trait]
impl AppInstance for MockAppInstance {
    async fn pid(&self) -> Result<u32, ProcessQueryError> {
        self.log.record("pid");
        self.pid.clone()
    }

    async fn stop(&mut self) -> anyhow::Result<()> {
        self.log.record("stop");
        match &self.stop {
            StopBehavior::Succeed => Ok(()),
            StopBehavior::Fail(message) => anyhow::bail!("{message}"),
            StopBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}

/// Signaller that records kills and returns a scripted result.
pub struct RecordingSignaller {
    failure: Option<TerminationFailure>,
    log: CallLog,
}

impl RecordingSignaller {
    /// Signaller whose kills succeed.
    pub const fn new(log: CallLog) -> Self {
        Self { failure: None, log }
    }

    /// Signaller whose kills fail with `failure`.
    pub const fn failing(failure: TerminationFailure, log: CallLog) -> Self {
        Self {
            failure: Some(failure),
            log,
        }
    }
}

impl ProcessSignaller for RecordingSignaller {
    fn kill(&self, pid: u32) -> Result<(), TerminationFailure> {
        self.log.record(format!("kill:{pid}"));
        self.failure.clone().map_or(Ok(()), Err)
    }
}
