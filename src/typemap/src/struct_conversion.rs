//! Copying kernel structs out to (and in from) guest memory.
//!
//! Each `copy_out_*` checks the whole destination before writing anything,
//! so a `false` return means guest memory was left untouched.  Layouts are
//! the 32-bit guest ABI ones from `sysdefs::data::sys_struct`.
use cage::memory::MemoryAccessor;
use std::time::Duration;
use sysdefs::data::sys_struct::*;

/// struct timespec: 64-bit seconds, 32-bit nanoseconds, 4 bytes padding.
pub fn copy_out_timespec(mem: &MemoryAccessor, addr: u32, t: Duration) -> bool {
    if !mem.check_range(addr, SIZEOF_TIMESPEC, 8) {
        return false;
    }
    mem.write_i64(addr, t.as_secs() as i64)
        && mem.write_u32(addr + TIMESPEC_NSEC_OFFSET, t.subsec_nanos())
        && mem.write_u32(addr + TIMESPEC_NSEC_OFFSET + 4, 0)
}

/// struct timeval: 64-bit seconds and 64-bit microseconds.
pub fn copy_out_timeval(mem: &MemoryAccessor, addr: u32, t: Duration) -> bool {
    if !mem.check_range(addr, SIZEOF_TIMEVAL, 8) {
        return false;
    }
    mem.write_i64(addr, t.as_secs() as i64)
        && mem.write_i64(addr + TIMEVAL_USEC_OFFSET, i64::from(t.subsec_micros()))
}

/// struct rlimit with 32-bit fields.  Values that do not fit read back as
/// `u32::MAX`, which is what the guest knows as RLIM_INFINITY.
pub fn copy_out_rlimit(mem: &MemoryAccessor, addr: u32, limit: Rlimit) -> bool {
    if !mem.check_range(addr, SIZEOF_RLIMIT, 4) {
        return false;
    }
    let cur = u32::try_from(limit.rlim_cur).unwrap_or(u32::MAX);
    let max = u32::try_from(limit.rlim_max).unwrap_or(u32::MAX);
    mem.write_u32(addr, cur) && mem.write_u32(addr + 4, max)
}

pub fn copy_in_rlimit(mem: &MemoryAccessor, addr: u32) -> Option<Rlimit> {
    Some(Rlimit {
        rlim_cur: u64::from(mem.read_u32(addr)?),
        rlim_max: u64::from(mem.read_u32(addr.checked_add(4)?)?),
    })
}

/// struct rlimit64.
pub fn copy_out_rlimit64(mem: &MemoryAccessor, addr: u32, limit: Rlimit) -> bool {
    if !mem.check_range(addr, SIZEOF_RLIMIT64, 8) {
        return false;
    }
    mem.write_u64(addr, limit.rlim_cur) && mem.write_u64(addr + 8, limit.rlim_max)
}

pub fn copy_in_rlimit64(mem: &MemoryAccessor, addr: u32) -> Option<Rlimit> {
    Some(Rlimit {
        rlim_cur: mem.read_u64(addr)?,
        rlim_max: mem.read_u64(addr.checked_add(8)?)?,
    })
}

/// struct utsname: sysname, nodename, release, version, machine,
/// domainname, each in a 65-byte NUL-padded field.
pub fn copy_out_utsname(mem: &MemoryAccessor, addr: u32, fields: [&str; 6]) -> bool {
    if !mem.check_range(addr, SIZEOF_UTSNAME, 1) {
        return false;
    }
    fields.iter().enumerate().all(|(i, field)| {
        mem.write_string(addr + i as u32 * UTSNAME_FIELD_LEN, field, UTSNAME_FIELD_LEN)
    })
}

/// struct rusage, all zero except `ru_maxrss` when given.
pub fn copy_out_rusage(mem: &MemoryAccessor, addr: u32, maxrss: Option<u32>) -> bool {
    if !mem.check_range(addr, SIZEOF_RUSAGE, 8) {
        return false;
    }
    if !mem.write_zeroes(addr, SIZEOF_RUSAGE) {
        return false;
    }
    match maxrss {
        Some(rss) => mem.write_u32(addr + RUSAGE_MAXRSS_OFFSET, rss),
        None => true,
    }
}
