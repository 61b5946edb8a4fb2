// RawPOSIX Test Suite
//
// Unit tests for the syscall handlers.  Each test builds its own cage over
// one page of guest memory with a scripted clock and a recording entropy
// source, so tests share no state and can run in parallel.

mod fdtable_tests; // dup/dup2/dup3/close and socket stubs
mod time_tests; // clocks, adjtimex, gettimeofday, times

use crate::syscalls::SyscallReturn;
use cage::{Cage, CageConfig, ClockSource, HostCapabilities, LinearMemory, RandomSource};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::lind_platform_const::WASM_PAGE_SIZE;
use typemap::syscall_conv::SyscallArgs;

/// Guest address well inside the test page, 8-byte aligned.
pub const BUF: u64 = 0x100;

/// Fixed wall-clock reading: 2001-09-09T01:46:40.5Z
pub const REALTIME: Duration = Duration::new(1_000_000_000, 500_000_000);

/// Monotonic clock that replays a script, then sticks at the last value.
pub struct ScriptedClock {
    readings: VecDeque<Duration>,
    last: Duration,
}

impl ScriptedClock {
    pub fn new(readings: &[Duration]) -> Self {
        ScriptedClock {
            readings: readings.iter().copied().collect(),
            last: Duration::ZERO,
        }
    }
}

impl ClockSource for ScriptedClock {
    fn realtime(&self) -> Duration {
        REALTIME
    }

    fn monotonic(&mut self) -> Duration {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Entropy source that fills with a counter and records each request size.
#[derive(Clone, Default)]
pub struct CountingRandom {
    pub requests: Arc<Mutex<Vec<usize>>>,
}

impl RandomSource for CountingRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), Errno> {
        let mut requests = self.requests.lock();
        let seed = requests.len() as u8;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8) | 1;
        }
        requests.push(buf.len());
        Ok(())
    }
}

/// A fresh cage with default config.  The clock reads 0 at startup and then
/// follows `monotonic`.
pub fn test_cage_with_clock(monotonic: &[Duration]) -> (Cage, CountingRandom) {
    let random = CountingRandom::default();
    let mut script = vec![Duration::ZERO];
    script.extend_from_slice(monotonic);
    let host = HostCapabilities::headless()
        .with_clock(Box::new(ScriptedClock::new(&script)))
        .with_random(Box::new(random.clone()));
    let cage = Cage::new(
        &CageConfig::default(),
        LinearMemory::shared(WASM_PAGE_SIZE),
        host,
    );
    (cage, random)
}

pub fn test_cage() -> Cage {
    test_cage_with_clock(&[]).0
}

/// Call a handler the way the dispatcher does.
pub fn call(
    cage: &mut Cage,
    func: fn(&mut Cage, &SyscallArgs) -> SyscallReturn,
    args: &[u64],
) -> SyscallReturn {
    func(cage, &SyscallArgs::new(args))
}

/// The negated errno a failed call returns.
pub fn err(e: Errno) -> SyscallReturn {
    Ok(e.as_retval())
}

pub fn read_bytes(cage: &Cage, addr: u64, len: usize) -> Vec<u8> {
    let start = addr as usize;
    cage.memory.shared().read().bytes()[start..start + len].to_vec()
}

pub fn fill_bytes(cage: &Cage, addr: u64, len: usize, value: u8) {
    let start = addr as usize;
    cage.memory.shared().write().bytes_mut()[start..start + len].fill(value);
}

/// A negative int as the guest passes it: zero-extended 32 bits.
pub fn neg(v: i32) -> u64 {
    v as u32 as u64
}
