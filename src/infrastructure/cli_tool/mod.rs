//! External CLI tool invocation

pub mod shell_runner;

pub use shell_runner::ShellCommandRunner;
