//! Repository polling through the public API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use e2e_harness::adapters::mock::{
    no_repositories, CallLog, RecordingSignaller, RecordingSleeper, ScriptedCommandRunner,
};
use e2e_harness::domain::errors::{InvocationError, PollError};
use e2e_harness::domain::models::{HarnessConfig, PollConfig, RepositoryEntry};
use e2e_harness::domain::ports::TokioSleeper;
use e2e_harness::infrastructure::cli_tool::ShellCommandRunner;
use e2e_harness::services::ConvergencePoller;
use e2e_harness::Harness;

const TWO_REPOS: &str = r#"[
  {"name": "bitnami", "url": "https://charts.bitnami.com/bitnami"},
  {"name": "stable", "url": "https://charts.helm.sh/stable"}
]"#;

fn poll_config(command: &str) -> PollConfig {
    PollConfig {
        command: command.to_string(),
        retry_delay_ms: 10,
        ..PollConfig::default()
    }
}

#[tokio::test]
async fn test_converges_after_tool_starts_reporting() {
    common::setup_test_logging();
    let runner = Arc::new(ScriptedCommandRunner::fail_then_succeed(2, TWO_REPOS));
    let sleeper = Arc::new(RecordingSleeper::new());
    let poller = ConvergencePoller::new(runner.clone(), sleeper.clone(), PollConfig::default());

    let entries = poller.list_entries_with_budget(5).await;

    assert_eq!(
        entries,
        vec![
            RepositoryEntry::new("bitnami", "https://charts.bitnami.com/bitnami"),
            RepositoryEntry::new("stable", "https://charts.helm.sh/stable"),
        ]
    );
    assert_eq!(runner.invocation_count(), 3);
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(2); 2]);
}

#[tokio::test]
async fn test_never_converging_returns_empty_after_full_budget() {
    let runner = Arc::new(ScriptedCommandRunner::always_failing(no_repositories()));
    let sleeper = Arc::new(RecordingSleeper::new());
    let poller = ConvergencePoller::new(runner.clone(), sleeper.clone(), PollConfig::default());

    let report = poller.poll(5).await;

    assert!(!report.is_converged());
    assert_eq!(report.invocations, 6);
    assert_eq!(runner.invocation_count(), 6);
    assert_eq!(sleeper.total(), Duration::from_secs(10));
    assert!(matches!(
        report.last_error,
        Some(PollError::Invocation(InvocationError::NonZeroExit { .. }))
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_real_shell_command_converges() {
    let dir = tempfile::tempdir().unwrap();
    let counter = dir.path().join("attempts");
    let command = format!(
        "n=$(cat '{c}' 2>/dev/null || echo 0); n=$((n+1)); echo $n > '{c}'; \
         if [ $n -lt 3 ]; then echo 'Error: no repositories to show' >&2; exit 1; fi; \
         echo '[{{\"name\":\"bitnami\",\"url\":\"https://charts.bitnami.com/bitnami\"}}]'",
        c = counter.display()
    );

    let poller = ConvergencePoller::new(
        Arc::new(ShellCommandRunner),
        Arc::new(TokioSleeper),
        poll_config(&command),
    );
    let report = poller.poll(5).await;

    assert!(report.is_converged());
    assert_eq!(report.invocations, 3);
    assert_eq!(report.entries[0].name, "bitnami");
    assert_eq!(std::fs::read_to_string(&counter).unwrap().trim(), "3");
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_tool_fails_fast_when_enabled() {
    let config = PollConfig {
        fail_fast_on_missing_tool: true,
        ..poll_config("e2e-harness-no-such-tool repo list -o json")
    };
    let poller = ConvergencePoller::new(Arc::new(ShellCommandRunner), Arc::new(TokioSleeper), config);

    let report = poller.poll(5).await;

    assert_eq!(report.invocations, 1);
    assert!(report.last_error.as_ref().is_some_and(PollError::is_missing_tool));
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_tool_retried_by_default() {
    let poller = ConvergencePoller::new(
        Arc::new(ShellCommandRunner),
        Arc::new(TokioSleeper),
        poll_config("e2e-harness-no-such-tool repo list -o json"),
    );

    let report = poller.poll(2).await;

    assert!(report.entries.is_empty());
    assert_eq!(report.invocations, 3);
}

#[tokio::test]
async fn test_harness_lists_repositories_with_configured_budget() {
    let mut config = HarnessConfig::default();
    config.poll.max_retries = 2;

    let runner = Arc::new(ScriptedCommandRunner::always("[]"));
    let sleeper = Arc::new(RecordingSleeper::new());
    let harness = Harness::with_ports(
        config,
        runner.clone(),
        sleeper.clone(),
        Arc::new(RecordingSignaller::new(CallLog::new())),
    );

    assert!(harness.list_repositories().await.is_empty());
    assert_eq!(runner.invocation_count(), 3);
    assert_eq!(sleeper.delays().len(), 2);
}
