//! Domain errors for the e2e harness.
//!
//! Only [`ProcessQueryError`] is allowed to escape a teardown. Every other
//! failure kind here is absorbed by the component that produced it and turned
//! into a log line or a degraded-but-valid return value.

use std::io;

use thiserror::Error;

/// The pid of a supposedly-running application could not be determined.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessQueryError {
    #[error("process {pid} exited before its pid could be queried")]
    Exited { pid: u32 },

    #[error("process {pid} is not running")]
    NotRunning { pid: u32 },

    #[error("process id unavailable: {0}")]
    Unavailable(String),
}

/// The forceful kill of a pid failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TerminationFailure {
    #[error("no such process: {pid}")]
    NoSuchProcess { pid: u32 },

    #[error("permission denied signalling process {pid}")]
    PermissionDenied { pid: u32 },

    #[error("failed to signal process {pid}: {message}")]
    Signal { pid: u32, message: String },
}

impl TerminationFailure {
    /// True when the target was already gone, which is the expected outcome
    /// after a successful graceful stop.
    pub const fn is_already_exited(&self) -> bool {
        matches!(self, Self::NoSuchProcess { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("code {c}"))
}

/// The external command could not be run to a successful exit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("failed to spawn '{command}': {message}")]
    Spawn {
        command: String,
        kind: io::ErrorKind,
        message: String,
    },

    #[error("'{command}' exited with {}: {stderr}", describe_exit(.code))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error while running command: {0}")]
    Io(String),
}

impl InvocationError {
    /// Build a spawn error from the underlying I/O error.
    pub fn spawn(command: impl Into<String>, err: &io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// The tool itself is missing or not executable.
    ///
    /// Retrying cannot fix this, unlike a tool that ran and reported no data.
    pub fn is_missing_tool(&self) -> bool {
        matches!(
            self,
            Self::Spawn {
                kind: io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied,
                ..
            }
        )
    }
}

/// The external command ran but its output was not a usable entry list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("command produced no output")]
    EmptyOutput,

    #[error("malformed JSON payload: {0}")]
    Malformed(String),

    #[error("payload contained no entries")]
    NoEntries,

    #[error("duplicate repository name: {0}")]
    DuplicateName(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A single failed poll attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("invocation failed: {0}")]
    Invocation(#[from] InvocationError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

impl PollError {
    /// See [`InvocationError::is_missing_tool`].
    pub fn is_missing_tool(&self) -> bool {
        matches!(self, Self::Invocation(err) if err.is_missing_tool())
    }
}

/// Path resolution or launch preparation failed.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform {0} is not supported")]
    Unsupported(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("failed to remove {path}: {message}")]
    RemoveLibrary { path: String, message: String },
}

/// The application could not be brought up.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn application: {0}")]
    Spawn(String),

    #[error("application exited during startup (code {code:?})")]
    ExitedDuringStartup { code: Option<i32> },

    #[error("spawned application did not report a pid")]
    MissingPid,
}
