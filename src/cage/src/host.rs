//! Capabilities the host lends to a cage.  The kernel never owns a real
//! console, clock, or entropy source; it calls through these.
use crate::clock::{ClockSource, SystemClock};
pub use fdtables::ConsoleSink;
use rand::rngs::OsRng;
use rand::RngCore;
use std::io::Write;
use std::sync::Arc;
use sysdefs::constants::err_const::Errno;

/// A source of cryptographically strong bytes.
pub trait RandomSource: Send {
    /// Fill all of `buf`.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Errno>;
}

/// Entropy from the host OS.
#[derive(Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Errno> {
        OsRng.try_fill_bytes(buf).map_err(|e| {
            log::warn!("host: entropy source failed: {}", e);
            Errno::EIO
        })
    }
}

/// The host process's own stdout and stderr.
#[derive(Debug, Default)]
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

/// Everything a cage calls out to.
pub struct HostCapabilities {
    pub console: Option<Arc<dyn ConsoleSink>>,
    pub clock: Box<dyn ClockSource>,
    pub random: Box<dyn RandomSource>,
}

impl HostCapabilities {
    /// The host process's console, clock and OS entropy.
    pub fn system() -> Self {
        HostCapabilities {
            console: Some(Arc::new(StdConsole)),
            clock: Box::new(SystemClock::new()),
            random: Box::new(OsRandom),
        }
    }

    /// Like [`system`](Self::system) but with no console, so stdio goes to
    /// the null device.
    pub fn headless() -> Self {
        HostCapabilities {
            console: None,
            ..Self::system()
        }
    }

    pub fn with_console(mut self, console: Option<Arc<dyn ConsoleSink>>) -> Self {
        self.console = console;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn ClockSource>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }
}

impl std::fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("console", &self.console.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let mut buf = [0u8; 64];
        OsRandom.fill(&mut buf).unwrap();
        // 64 zero bytes from a working entropy source is not a realistic outcome
        assert!(buf.iter().any(|b| *b != 0));
    }

    #[test]
    fn headless_has_no_console() {
        assert!(HostCapabilities::headless().console.is_none());
        assert!(HostCapabilities::system().console.is_some());
    }
}
