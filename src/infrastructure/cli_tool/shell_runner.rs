//! Shell-backed command runner.

use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::domain::errors::InvocationError;
use crate::domain::ports::{CommandOutput, CommandRunner};

/// Shell exit status for "command not found".
const SHELL_NOT_FOUND: i32 = 127;
/// Shell exit status for "found but not executable".
const SHELL_NOT_EXECUTABLE: i32 = 126;

/// Runs command lines through the platform shell (`sh -c` / `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    fn shell(command: &str) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(command);
        cmd
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    #[instrument(skip(self))]
    async fn run(&self, command: &str) -> Result<CommandOutput, InvocationError> {
        let output = Self::shell(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| InvocationError::spawn(command, &e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            debug!(bytes = stdout.len(), "Command succeeded");
            return Ok(CommandOutput { stdout, stderr });
        }

        // The shell itself spawned fine; surface a missing tool the same way
        // a direct spawn would.
        let missing = match output.status.code() {
            Some(SHELL_NOT_FOUND) if cfg!(unix) => Some(io::ErrorKind::NotFound),
            Some(SHELL_NOT_EXECUTABLE) if cfg!(unix) => Some(io::ErrorKind::PermissionDenied),
            _ => None,
        };

        Err(match missing {
            Some(kind) => InvocationError::Spawn {
                command: command.to_string(),
                kind,
                message: stderr,
            },
            None => InvocationError::NonZeroExit {
                command: command.to_string(),
                code: output.status.code(),
                stderr,
            },
        })
    }
}
