//! Clock and time syscalls.
//!
//! REALTIME comes straight from the host.  MONOTONIC goes through the
//! cage's clock state so it never runs backwards, even when the host timer
//! does.  Nothing here can set or adjust a clock.
use super::SyscallReturn;
use cage::Cage;
use std::time::Duration;
use sysdefs::constants::err_const::{syscall_error, Errno};
use sysdefs::constants::sys_const::*;
use sysdefs::data::sys_struct::{
    SIZEOF_TIMESPEC, SIZEOF_TIMEVAL, SIZEOF_TIMEX, SIZEOF_TIMEZONE, SIZEOF_TMS,
};
use typemap::datatype_conversion::*;
use typemap::struct_conversion::*;
use typemap::syscall_conv::SyscallArgs;

fn is_known_clock(clockid: u32) -> bool {
    clockid == CLOCK_REALTIME || clockid == CLOCK_MONOTONIC
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/clock_gettime.2.html
///
/// The destination is checked before the clock is read, so a bad pointer
/// leaves the monotonic state untouched.
pub fn clock_gettime_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let clockid = sc_convert_sysarg_to_u32(args.arg1());
    if !is_known_clock(clockid) {
        return Ok(syscall_error(Errno::EINVAL, "clock_gettime", "Invalid clock"));
    }
    let ts = match sc_convert_addr(args.arg2()) {
        Some(ts) if cage.memory.check_range(ts, SIZEOF_TIMESPEC, 8) => ts,
        _ => return Ok(syscall_error(Errno::EFAULT, "clock_gettime", "Bad address")),
    };
    let now = if clockid == CLOCK_MONOTONIC {
        cage.monotonic_now()
    } else {
        cage.realtime_now()
    };
    if !copy_out_timespec(&cage.memory, ts, now) {
        return Ok(syscall_error(Errno::EFAULT, "clock_gettime", "Bad address"));
    }
    Ok(0)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/clock_getres.2.html
///
/// Resolutions are estimates: 15ms for the wall clock, whatever the host
/// claims for the monotonic one.  A NULL `res` just validates the clock.
pub fn clock_getres_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let clockid = sc_convert_sysarg_to_u32(args.arg1());
    let resolution = match clockid {
        CLOCK_REALTIME => REALTIME_RESOLUTION_NS,
        CLOCK_MONOTONIC => cage.host.clock.monotonic_resolution_ns(),
        _ => return Ok(syscall_error(Errno::EINVAL, "clock_getres", "Invalid clock")),
    };
    let nanos = resolution.clamp(1, NSEC_PER_SEC - 1);
    match sc_convert_addr(args.arg2()) {
        None => Ok(0),
        Some(ts) if copy_out_timespec(&cage.memory, ts, Duration::from_nanos(nanos)) => Ok(0),
        Some(_) => Ok(syscall_error(Errno::EFAULT, "clock_getres", "Bad address")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/clock_settime.2.html
pub fn clock_settime_syscall(_cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let clockid = sc_convert_sysarg_to_u32(args.arg1());
    if !is_known_clock(clockid) {
        return Ok(syscall_error(Errno::EINVAL, "clock_settime", "Invalid clock"));
    }
    Ok(syscall_error(Errno::EPERM, "clock_settime", "Cannot set clock"))
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/adjtimex.2.html
///
/// Only a read-only query (modes 0 or ADJ_OFFSET_SS_READ) is allowed.  It
/// reports a zeroed `struct timex` and a synchronized clock.
pub fn adjtimex_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    Ok(adjtimex(cage, args.arg1(), "adjtimex"))
}

pub fn clock_adjtime_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let clockid = sc_convert_sysarg_to_u32(args.arg1());
    if !is_known_clock(clockid) {
        return Ok(syscall_error(Errno::EINVAL, "clock_adjtime", "Invalid clock"));
    }
    Ok(adjtimex(cage, args.arg2(), "clock_adjtime"))
}

fn adjtimex(cage: &Cage, txarg: u64, name: &str) -> i32 {
    let Some(tx) = sc_convert_addr(txarg) else {
        return syscall_error(Errno::EFAULT, name, "Bad address");
    };
    let modes = match cage.memory.read_u32(tx) {
        Some(modes) => modes,
        None => return syscall_error(Errno::EFAULT, name, "Bad address"),
    };
    if modes != 0 && modes != ADJ_OFFSET_SS_READ {
        return syscall_error(Errno::EPERM, name, "Cannot adjust clock");
    }
    if !cage.memory.write_zeroes(tx, SIZEOF_TIMEX) {
        return syscall_error(Errno::EFAULT, name, "Bad address");
    }
    TIME_OK
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/gettimeofday.2.html
///
/// Either pointer may be NULL.  The timezone is obsolete and reads as zero.
pub fn gettimeofday_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let tv = sc_convert_addr(args.arg1());
    let tz = sc_convert_addr(args.arg2());
    if tv.is_some_and(|tv| !cage.memory.check_range(tv, SIZEOF_TIMEVAL, 8))
        || tz.is_some_and(|tz| !cage.memory.check_range(tz, SIZEOF_TIMEZONE, 4))
    {
        return Ok(syscall_error(Errno::EFAULT, "gettimeofday", "Bad address"));
    }
    if let Some(tv) = tv {
        copy_out_timeval(&cage.memory, tv, cage.realtime_now());
    }
    if let Some(tz) = tz {
        cage.memory.write_zeroes(tz, SIZEOF_TIMEZONE);
    }
    Ok(0)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/time.2.html
///
/// `*tloc` gets the full 64-bit count.  The return value saturates at
/// `i32::MAX` so it can never be mistaken for an errno.
pub fn time_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let secs = cage.realtime_now().as_secs() as i64;
    if let Some(tloc) = sc_convert_addr(args.arg1()) {
        if !cage.memory.write_i64(tloc, secs) {
            return Ok(syscall_error(Errno::EFAULT, "time", "Bad address"));
        }
    }
    Ok(i32::try_from(secs).unwrap_or(i32::MAX))
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/times.2.html
///
/// No CPU time is ever accounted, so `struct tms` is all zero.  The return
/// value is elapsed time since cage start in USER_HZ ticks.
pub fn times_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    if let Some(tms) = sc_convert_addr(args.arg1()) {
        if !cage.memory.write_zeroes(tms, SIZEOF_TMS) {
            return Ok(syscall_error(Errno::EFAULT, "times", "Bad address"));
        }
    }
    let elapsed = cage.monotonic_now().saturating_sub(cage.started);
    let ticks = elapsed.as_millis() / (1000 / u128::from(USER_HZ));
    Ok(i32::try_from(ticks).unwrap_or(i32::MAX))
}
