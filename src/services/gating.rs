//! Conditional test gating.
//!
//! Selects between running a test body and skipping it based on a condition
//! known at registration time, e.g. "only on Linux" or "only when helm is
//! installed".

use std::future::Future;
use tracing::info;

/// Whether a gated test body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The body runs
    Run,
    /// The body is skipped
    Skip,
}

impl Gate {
    /// `Run` when `condition` holds, otherwise `Skip`.
    pub const fn when(condition: bool) -> Self {
        if condition { Self::Run } else { Self::Skip }
    }

    /// True for [`Gate::Run`].
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Run)
    }

    /// Run a synchronous body, or log the skip and return `None`.
    pub fn run<T>(self, name: &str, body: impl FnOnce() -> T) -> Option<T> {
        match self {
            Self::Run => Some(body()),
            Self::Skip => {
                info!(test = name, "Skipping gated test");
                None
            }
        }
    }

    /// Async counterpart of [`Gate::run`]; the future is not polled when skipped.
    pub async fn run_async<T, F>(self, name: &str, body: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        match self {
            Self::Run => Some(body.await),
            Self::Skip => {
                info!(test = name, "Skipping gated test");
                None
            }
        }
    }
}

/// Gate for a single test.
pub const fn it_if(condition: bool) -> Gate {
    Gate::when(condition)
}

/// Gate for a group of tests.
pub const fn describe_if(condition: bool) -> Gate {
    Gate::when(condition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_selection() {
        assert_eq!(it_if(true), Gate::Run);
        assert_eq!(it_if(false), Gate::Skip);
        assert_eq!(describe_if(cfg!(unix)), Gate::when(cfg!(unix)));
        assert!(Gate::Run.is_enabled());
        assert!(!Gate::Skip.is_enabled());
    }

    #[test]
    fn test_skip_does_not_run_body() {
        let mut ran = false;
        let result = it_if(false).run("never", || ran = true);
        assert!(result.is_none());
        assert!(!ran);

        assert_eq!(it_if(true).run("always", || 3), Some(3));
    }

    #[tokio::test]
    async fn test_run_async() {
        assert_eq!(it_if(true).run_async("async", async { "ok" }).await, Some("ok"));
        assert_eq!(
            describe_if(false).run_async("group", async { "ok" }).await,
            None
        );
    }
}
