//! Signal delivery and process termination.
//!
//! Nothing can install a handler, so every real signal is fatal.  Fatal
//! signals and exit both surface as a [`Termination`] that the dispatcher
//! hands back to the host instead of a return value.
use std::fmt;

/// How the guest stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// exit/exit_group with this status
    Exited { status: i32 },
    /// killed by an unhandled signal
    Signaled { signal: i32 },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited { status } => write!(f, "module called exit({})", status),
            Termination::Signaled { signal } => write!(f, "module received signal {}", signal),
        }
    }
}

impl std::error::Error for Termination {}

/// Deliver `sig` to the process.  Signal 0 only checks for existence and
/// returns 0; any other signal terminates the process.
pub fn deliver_signal(sig: i32) -> Result<i32, Termination> {
    if sig == 0 {
        return Ok(0);
    }
    log::debug!("signal: delivering fatal signal {}", sig);
    Err(Termination::Signaled { signal: sig })
}
