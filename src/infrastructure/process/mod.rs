//! Process management infrastructure
//!
//! - Launching the application under test with tokio
//! - Wrapping foreign pids
//! - Signal delivery with nix

pub mod signal;
pub mod spawned_app;

pub use signal::{has_exited, is_alive, send_signal, NixSignaller};
pub use spawned_app::{PidInstance, SpawnedApp};
