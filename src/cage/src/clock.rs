//! Realtime and monotonic clocks.
//!
//! The host's monotonic source is not trusted to be monotonic: it may have
//! coarse resolution or step backwards.  [`ClockState`] sits between it and
//! the guest and keeps every reported value at or after the previous one.
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use sysdefs::constants::sys_const::MONOTONIC_RESOLUTION_NS;

/// Host time source.
pub trait ClockSource: Send {
    /// Wall-clock time since the UNIX epoch.
    fn realtime(&self) -> Duration;

    /// Raw monotonic reading.  Not guaranteed to be monotonic.
    fn monotonic(&mut self) -> Duration;

    /// Best estimate of the monotonic source's resolution in nanoseconds.
    fn monotonic_resolution_ns(&self) -> u64 {
        MONOTONIC_RESOLUTION_NS
    }
}

/// Clock backed by the host OS.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn realtime(&self) -> Duration {
        // A host clock set before 1970 reads as the epoch
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }

    fn monotonic(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Monotonic clock bookkeeping: the last value handed to the guest and the
/// total correction applied to the raw source so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    last: Duration,
    bias: Duration,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a raw host reading into the value reported to the guest.  If the
    /// biased reading would be earlier than the last report, the deficit is
    /// folded into the bias and the last report is repeated.
    pub fn observe(&mut self, raw: Duration) -> Duration {
        let candidate = raw + self.bias;
        if candidate < self.last {
            self.bias += self.last - candidate;
            return self.last;
        }
        self.last = candidate;
        candidate
    }

    pub fn bias(&self) -> Duration {
        self.bias
    }
}
