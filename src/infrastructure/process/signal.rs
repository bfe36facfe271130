//! Signal delivery through `nix`.

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::domain::errors::TerminationFailure;
use crate::domain::ports::ProcessSignaller;

/// [`ProcessSignaller`] that sends SIGKILL with `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NixSignaller;

impl ProcessSignaller for NixSignaller {
    fn kill(&self, pid: u32) -> Result<(), TerminationFailure> {
        send_signal(pid, Some(Signal::SIGKILL))
    }
}

/// Send `sig` to `pid`; `None` only probes for existence.
pub fn send_signal(pid: u32, sig: Option<Signal>) -> Result<(), TerminationFailure> {
    let target = to_pid(pid)?;
    signal::kill(target, sig).map_err(|errno| match errno {
        Errno::ESRCH => TerminationFailure::NoSuchProcess { pid },
        Errno::EPERM => TerminationFailure::PermissionDenied { pid },
        other => TerminationFailure::Signal {
            pid,
            message: other.desc().to_string(),
        },
    })
}

/// True while a process with `pid` exists, including ones we may not signal.
pub fn is_alive(pid: u32) -> bool {
    matches!(
        send_signal(pid, None),
        Ok(()) | Err(TerminationFailure::PermissionDenied { .. })
    )
}

/// True once `pid` has terminated, even if its parent has not reaped it yet.
///
/// A zombie still answers the signal-0 probe, so [`is_alive`] alone would
/// report an exited but unreaped process as running.
pub fn has_exited(pid: u32) -> bool {
    !is_alive(pid) || is_zombie(pid)
}

// State is the first field after the parenthesised comm; Z and X are terminated
#[cfg(target_os = "linux")]
fn is_zombie(pid: u32) -> bool {
    std::fs::read_to_string(format!("/proc/{pid}/stat"))
        .ok()
        .and_then(|stat| {
            let (_, tail) = stat.rsplit_once(") ")?;
            tail.split_whitespace()
                .next()
                .map(|state| matches!(state, "Z" | "X"))
        })
        .unwrap_or(false)
}

#[cfg(not(target_os = "linux"))]
const fn is_zombie(_pid: u32) -> bool {
    false
}

// pid 0 and anything past i32::MAX would address process groups
fn to_pid(pid: u32) -> Result<Pid, TerminationFailure> {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Ok(Pid::from_raw(raw)),
        _ => Err(TerminationFailure::Signal {
            pid,
            message: "not a single-process pid".to_string(),
        }),
    }
}
