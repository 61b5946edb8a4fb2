// Clock and time syscall tests
//
// The scripted clock reads 0 at cage start, then replays the given values.

use crate::syscalls::time_calls::*;
use crate::tests::*;
use cage::{Cage, CageConfig, ClockSource, HostCapabilities, LinearMemory};
use std::time::Duration;
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::lind_platform_const::WASM_PAGE_SIZE;
use sysdefs::constants::sys_const::*;
use sysdefs::data::sys_struct::{SIZEOF_TIMEX, SIZEOF_TMS};

fn secs(v: u64) -> Duration {
    Duration::from_secs(v)
}

fn read_timespec(cage: &Cage, addr: u64) -> (u64, u32) {
    let sec = cage.memory.read_u64(addr as u32).unwrap();
    let nsec = cage.memory.read_u32(addr as u32 + 8).unwrap();
    (sec, nsec)
}

/// Test: CLOCK_REALTIME reports the host wall clock
#[test]
fn test_clock_gettime_realtime() {
    let mut cage = test_cage();
    fill_bytes(&cage, BUF, 16, 0xff);
    assert_eq!(
        call(&mut cage, clock_gettime_syscall, &[u64::from(CLOCK_REALTIME), BUF]),
        Ok(0)
    );
    assert_eq!(read_timespec(&cage, BUF), (1_000_000_000, 500_000_000));
    assert_eq!(cage.memory.read_u32(BUF as u32 + 12), Some(0));
}

/// Test: CLOCK_MONOTONIC never goes backwards even when the host does
#[test]
fn test_clock_gettime_monotonic_bias() {
    let (mut cage, _) = test_cage_with_clock(&[secs(5), secs(3), secs(7)]);
    let mono = u64::from(CLOCK_MONOTONIC);
    let mut seen = Vec::new();
    for _ in 0..3 {
        assert_eq!(call(&mut cage, clock_gettime_syscall, &[mono, BUF]), Ok(0));
        seen.push(read_timespec(&cage, BUF).0);
    }
    // 3s comes back as 5s; the 2s deficit carries forward into 7s -> 9s
    assert_eq!(seen, vec![5, 5, 9]);
    assert_eq!(cage.clock.bias(), secs(2));
}

/// Test: clock_gettime rejects unknown clocks and bad pointers
#[test]
fn test_clock_gettime_errors() {
    let mut cage = test_cage();
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[7, BUF]), err(Errno::EINVAL));
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[0, 0]), err(Errno::EFAULT));
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[0, BUF + 4]), err(Errno::EFAULT));
}

/// Test: a MONOTONIC read into a bad pointer does not consume a clock reading
#[test]
fn test_clock_gettime_efault_leaves_clock_alone() {
    let (mut cage, _) = test_cage_with_clock(&[secs(5), secs(9)]);
    let mono = u64::from(CLOCK_MONOTONIC);
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[mono, 0]), err(Errno::EFAULT));
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[mono, BUF + 4]), err(Errno::EFAULT));
    assert_eq!(
        call(&mut cage, clock_gettime_syscall, &[mono, u64::from(u32::MAX - 8)]),
        err(Errno::EFAULT)
    );
    assert_eq!(cage.clock.bias(), Duration::ZERO);
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[mono, BUF]), Ok(0));
    assert_eq!(read_timespec(&cage, BUF).0, 5);
    assert_eq!(call(&mut cage, clock_gettime_syscall, &[mono, BUF]), Ok(0));
    assert_eq!(read_timespec(&cage, BUF).0, 9);
}

/// Test: clock_getres reports each clock's resolution; NULL only validates
#[test]
fn test_clock_getres() {
    let mut cage = test_cage();
    assert_eq!(
        call(&mut cage, clock_getres_syscall, &[u64::from(CLOCK_REALTIME), BUF]),
        Ok(0)
    );
    assert_eq!(read_timespec(&cage, BUF), (0, REALTIME_RESOLUTION_NS as u32));
    assert_eq!(
        call(&mut cage, clock_getres_syscall, &[u64::from(CLOCK_MONOTONIC), BUF]),
        Ok(0)
    );
    assert_eq!(read_timespec(&cage, BUF), (0, MONOTONIC_RESOLUTION_NS as u32));
    assert_eq!(call(&mut cage, clock_getres_syscall, &[1, 0]), Ok(0));
    assert_eq!(call(&mut cage, clock_getres_syscall, &[3, 0]), err(Errno::EINVAL));
}

/// Test: clocks cannot be set
#[test]
fn test_clock_settime() {
    let mut cage = test_cage();
    assert_eq!(call(&mut cage, clock_settime_syscall, &[0, BUF]), err(Errno::EPERM));
    assert_eq!(call(&mut cage, clock_settime_syscall, &[9, BUF]), err(Errno::EINVAL));
}

/// Test: adjtimex answers a read-only query with a zeroed timex
#[test]
fn test_adjtimex_query() {
    let mut cage = test_cage();
    for modes in [0, ADJ_OFFSET_SS_READ] {
        fill_bytes(&cage, BUF, SIZEOF_TIMEX as usize, 0xff);
        cage.memory.write_u32(BUF as u32, modes);
        assert_eq!(call(&mut cage, adjtimex_syscall, &[BUF]), Ok(TIME_OK));
        assert!(read_bytes(&cage, BUF, SIZEOF_TIMEX as usize).iter().all(|b| *b == 0));
    }
}

/// Test: adjtimex refuses to adjust anything
#[test]
fn test_adjtimex_errors() {
    let mut cage = test_cage();
    cage.memory.write_u32(BUF as u32, 0x0001);
    assert_eq!(call(&mut cage, adjtimex_syscall, &[BUF]), err(Errno::EPERM));
    assert_eq!(cage.memory.read_u32(BUF as u32), Some(0x0001));
    assert_eq!(call(&mut cage, adjtimex_syscall, &[0]), err(Errno::EFAULT));
}

/// Test: clock_adjtime is adjtimex on a named clock
#[test]
fn test_clock_adjtime() {
    let mut cage = test_cage();
    cage.memory.write_u32(BUF as u32, 0);
    assert_eq!(
        call(&mut cage, clock_adjtime_syscall, &[u64::from(CLOCK_MONOTONIC), BUF]),
        Ok(TIME_OK)
    );
    assert_eq!(call(&mut cage, clock_adjtime_syscall, &[5, BUF]), err(Errno::EINVAL));
}

/// Test: gettimeofday fills timeval and a zero timezone, skipping NULLs
#[test]
fn test_gettimeofday() {
    let mut cage = test_cage();
    let tz = BUF + 32;
    fill_bytes(&cage, BUF, 48, 0xff);
    assert_eq!(call(&mut cage, gettimeofday_syscall, &[BUF, tz]), Ok(0));
    assert_eq!(cage.memory.read_u64(BUF as u32), Some(1_000_000_000));
    assert_eq!(cage.memory.read_u64(BUF as u32 + 8), Some(500_000));
    assert_eq!(cage.memory.read_u64(tz as u32), Some(0));
    assert_eq!(call(&mut cage, gettimeofday_syscall, &[0, 0]), Ok(0));
}

/// Test: gettimeofday writes nothing if either pointer is bad
#[test]
fn test_gettimeofday_bad_timezone() {
    let mut cage = test_cage();
    fill_bytes(&cage, BUF, 16, 0xff);
    assert_eq!(
        call(&mut cage, gettimeofday_syscall, &[BUF, BUF + 18]),
        err(Errno::EFAULT)
    );
    assert!(read_bytes(&cage, BUF, 16).iter().all(|b| *b == 0xff));
}

/// Test: time returns seconds and optionally stores them
#[test]
fn test_time() {
    let mut cage = test_cage();
    assert_eq!(call(&mut cage, time_syscall, &[0]), Ok(1_000_000_000));
    assert_eq!(call(&mut cage, time_syscall, &[BUF]), Ok(1_000_000_000));
    assert_eq!(cage.memory.read_u64(BUF as u32), Some(1_000_000_000));
    assert_eq!(call(&mut cage, time_syscall, &[BUF + 2]), err(Errno::EFAULT));
}

/// Wall clock stuck past 2038, where seconds no longer fit in an i32.
struct FarFutureClock;

impl ClockSource for FarFutureClock {
    fn realtime(&self) -> Duration {
        Duration::from_secs(1 << 32)
    }

    fn monotonic(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Test: time saturates its return past 2038 but stores the full value
#[test]
fn test_time_past_2038() {
    let host = HostCapabilities::headless().with_clock(Box::new(FarFutureClock));
    let mut cage = Cage::new(
        &CageConfig::default(),
        LinearMemory::shared(WASM_PAGE_SIZE),
        host,
    );
    assert_eq!(call(&mut cage, time_syscall, &[0]), Ok(i32::MAX));
    assert_eq!(call(&mut cage, time_syscall, &[BUF]), Ok(i32::MAX));
    assert_eq!(cage.memory.read_u64(BUF as u32), Some(1 << 32));
}

/// Test: times reports elapsed ticks since start and zero CPU time
#[test]
fn test_times() {
    let (mut cage, _) = test_cage_with_clock(&[Duration::from_millis(1234)]);
    fill_bytes(&cage, BUF, SIZEOF_TMS as usize, 0xff);
    assert_eq!(call(&mut cage, times_syscall, &[BUF]), Ok(123));
    assert!(read_bytes(&cage, BUF, SIZEOF_TMS as usize).iter().all(|b| *b == 0));
    assert_eq!(call(&mut cage, times_syscall, &[0]), Ok(123));
    let past_end = cage.memory.usage() as u64 - 4;
    assert_eq!(call(&mut cage, times_syscall, &[past_end]), err(Errno::EFAULT));
}
