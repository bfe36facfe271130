//! Harness services: convergence polling, process teardown and test gating.

pub mod convergence_poller;
pub mod gating;
pub mod lifecycle_supervisor;

pub use convergence_poller::{ConvergencePoller, PollReport};
pub use gating::{describe_if, it_if, Gate};
pub use lifecycle_supervisor::{GracefulOutcome, KillOutcome, LifecycleSupervisor, TeardownReport};
