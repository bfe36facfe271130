//! External command port.

use async_trait::async_trait;

use crate::domain::errors::InvocationError;

/// Output of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Output with only stdout populated.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs a command line and collects its output.
///
/// A non-zero exit is an error; implementations never hand back the output
/// of a failed run as success.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion.
    async fn run(&self, command: &str) -> Result<CommandOutput, InvocationError>;
}
