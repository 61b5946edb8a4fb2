//! System syscalls implementation
//!
//! This module contains the process-level calls emulated for the single
//! process a cage runs: identity, process groups, signals and exit,
//! resource limits, scheduling priority, and system information.
use super::SyscallReturn;
use cage::identity::id_unchanged;
use cage::{deliver_signal, Cage, Termination};
use sysdefs::constants::err_const::{syscall_error, Errno};
use sysdefs::constants::sys_const::*;
use sysdefs::data::sys_struct::{SIZEOF_RLIMIT64, UTSNAME_FIELDS};
use typemap::datatype_conversion::*;
use typemap::struct_conversion::*;
use typemap::syscall_conv::SyscallArgs;

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getpid.2.html
pub fn getpid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.pid)
}

/// The sole process is pid 1, so it has no parent.
pub fn getppid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.ppid)
}

pub fn gettid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.tid())
}

pub fn getuid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.uid as i32)
}

pub fn geteuid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.uid as i32)
}

pub fn getgid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.gid as i32)
}

pub fn getegid_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.gid as i32)
}

// getresuid/getresgid write the same id to three pointers.  All three are
// checked before any is written.
fn write_three_ids(cage: &Cage, args: &SyscallArgs, id: u32, name: &str) -> i32 {
    let ptrs = [args.arg1(), args.arg2(), args.arg3()].map(sc_convert_addr);
    let mut addrs = [0u32; 3];
    for (slot, ptr) in addrs.iter_mut().zip(ptrs) {
        match ptr {
            Some(addr) if cage.memory.check_range(addr, 4, 4) => *slot = addr,
            _ => return syscall_error(Errno::EFAULT, name, "Bad address"),
        }
    }
    for addr in addrs {
        cage.memory.write_u32(addr, id);
    }
    0
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getresuid.2.html
pub fn getresuid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    Ok(write_three_ids(cage, args, cage.identity.uid, "getresuid"))
}

pub fn getresgid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    Ok(write_three_ids(cage, args, cage.identity.gid, "getresgid"))
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getgroups.2.html
///
/// A count of 0 only asks how many groups there are.  With no supplementary
/// groups nothing is written, so the list pointer is not looked at.
pub fn getgroups_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let count = sc_convert_sysarg_to_i32(args.arg1());
    if count < 0 {
        return Ok(syscall_error(Errno::EINVAL, "getgroups", "Negative count"));
    }
    let ngroups = cage.identity.groups.len();
    if count == 0 {
        return Ok(ngroups as i32);
    }
    if (count as usize) < ngroups {
        return Ok(syscall_error(Errno::EINVAL, "getgroups", "List too small"));
    }
    if ngroups == 0 {
        return Ok(0);
    }
    let list = match sc_convert_addr(args.arg2()) {
        Some(list) if cage.memory.check_range(list, 4 * ngroups as u32, 4) => list,
        _ => return Ok(syscall_error(Errno::EFAULT, "getgroups", "Bad address")),
    };
    for (i, group) in cage.identity.groups.iter().enumerate() {
        cage.memory.write_u32(list + 4 * i as u32, *group);
    }
    Ok(ngroups as i32)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/setuid.2.html
///
/// There is one user and no privilege, so every set*id call succeeds only
/// when it would change nothing.  An id of -1 leaves that id alone.
pub fn setuid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let uid = sc_convert_sysarg_to_u32(args.arg1());
    Ok(check_ids(cage.identity.uid, &[uid], "setuid"))
}

pub fn setgid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let gid = sc_convert_sysarg_to_u32(args.arg1());
    Ok(check_ids(cage.identity.gid, &[gid], "setgid"))
}

pub fn setreuid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let ids = [args.arg1(), args.arg2()].map(sc_convert_sysarg_to_u32);
    Ok(check_ids(cage.identity.uid, &ids, "setreuid"))
}

pub fn setregid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let ids = [args.arg1(), args.arg2()].map(sc_convert_sysarg_to_u32);
    Ok(check_ids(cage.identity.gid, &ids, "setregid"))
}

pub fn setresuid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let ids = [args.arg1(), args.arg2(), args.arg3()].map(sc_convert_sysarg_to_u32);
    Ok(check_ids(cage.identity.uid, &ids, "setresuid"))
}

pub fn setresgid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let ids = [args.arg1(), args.arg2(), args.arg3()].map(sc_convert_sysarg_to_u32);
    Ok(check_ids(cage.identity.gid, &ids, "setresgid"))
}

/// setfsuid reports the previous fs id instead of 0.
pub fn setfsuid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let fsuid = sc_convert_sysarg_to_u32(args.arg1());
    match check_ids(cage.identity.uid, &[fsuid], "setfsuid") {
        0 => Ok(cage.identity.uid as i32),
        err => Ok(err),
    }
}

pub fn setfsgid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let fsgid = sc_convert_sysarg_to_u32(args.arg1());
    match check_ids(cage.identity.gid, &[fsgid], "setfsgid") {
        0 => Ok(cage.identity.gid as i32),
        err => Ok(err),
    }
}

fn check_ids(current: u32, requested: &[u32], name: &str) -> i32 {
    if requested.iter().all(|id| id_unchanged(current, *id)) {
        0
    } else {
        syscall_error(Errno::EPERM, name, "Cannot change identity")
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getpgid.2.html
pub fn getpgid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let pid = sc_convert_sysarg_to_i32(args.arg1());
    if !cage.identity.is_self(pid) {
        return Ok(syscall_error(Errno::ESRCH, "getpgid", "No such process"));
    }
    Ok(cage.identity.pgid())
}

pub fn getpgrp_syscall(cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(cage.identity.pgid())
}

pub fn getsid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let pid = sc_convert_sysarg_to_i32(args.arg1());
    if !cage.identity.is_self(pid) {
        return Ok(syscall_error(Errno::ESRCH, "getsid", "No such process"));
    }
    Ok(cage.identity.sid())
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/setpgid.2.html
///
/// The process already leads its own group; only moving it into that same
/// group is allowed.
pub fn setpgid_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let pid = sc_convert_sysarg_to_i32(args.arg1());
    let pgid = sc_convert_sysarg_to_i32(args.arg2());
    if !cage.identity.is_self(pid) {
        return Ok(syscall_error(Errno::ESRCH, "setpgid", "No such process"));
    }
    if !cage.identity.is_self(pgid) {
        return Ok(syscall_error(Errno::EPERM, "setpgid", "No such process group"));
    }
    Ok(0)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/kill.2.html
///
/// pid -1 would signal every process but the caller, and there is no other
/// process, so it is a successful no-op.  Otherwise the target must be the
/// process itself (pid 0 or 1).  The process group id is 1, so it cannot be
/// named as -pgid; every other negative pid is `ESRCH`.
pub fn kill_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let pid = sc_convert_sysarg_to_i32(args.arg1());
    let sig = sc_convert_sysarg_to_i32(args.arg2());
    if pid == -1 {
        return Ok(0);
    }
    if !(0..=SIGNAL_MAX).contains(&sig) {
        return Ok(syscall_error(Errno::EINVAL, "kill", "Invalid signal"));
    }
    if pid < 0 {
        return Ok(syscall_error(Errno::ESRCH, "kill", "No such process group"));
    }
    if pid > 0 && pid != cage.identity.pid {
        return Ok(syscall_error(Errno::ESRCH, "kill", "No such process"));
    }
    deliver_signal(sig)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/tkill.2.html
pub fn tkill_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let tid = sc_convert_sysarg_to_i32(args.arg1());
    let sig = sc_convert_sysarg_to_i32(args.arg2());
    if tid <= 0 {
        return Ok(syscall_error(Errno::EINVAL, "tkill", "Invalid thread id"));
    }
    signal_thread(cage, 0, tid, sig, "tkill")
}

pub fn tgkill_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let tgid = sc_convert_sysarg_to_i32(args.arg1());
    let tid = sc_convert_sysarg_to_i32(args.arg2());
    let sig = sc_convert_sysarg_to_i32(args.arg3());
    if tgid <= 0 || tid <= 0 {
        return Ok(syscall_error(Errno::EINVAL, "tgkill", "Invalid thread id"));
    }
    signal_thread(cage, tgid, tid, sig, "tgkill")
}

// The only thread is the main thread, whose tid is the pid.  tgid 0 means
// "whatever group the thread is in".
fn signal_thread(cage: &Cage, tgid: i32, tid: i32, sig: i32, name: &str) -> SyscallReturn {
    if !cage.identity.is_self(tgid) {
        return Ok(syscall_error(Errno::ESRCH, name, "No such thread group"));
    }
    if tid != cage.identity.tid() {
        return Ok(syscall_error(Errno::ESRCH, name, "No such thread"));
    }
    if !(0..=SIGNAL_MAX).contains(&sig) {
        return Ok(syscall_error(Errno::EINVAL, name, "Invalid signal"));
    }
    deliver_signal(sig)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/exit.2.html
///
/// exit and exit_group are the same thing with one thread.
pub fn exit_syscall(_cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let status = sc_convert_sysarg_to_i32(args.arg1());
    Err(Termination::Exited { status })
}

pub fn exit_group_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    exit_syscall(cage, args)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getrlimit.2.html
///
/// `struct rlimit` here has 32-bit fields.
pub fn getrlimit_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let resource = sc_convert_sysarg_to_u32(args.arg1());
    let limit = match cage.rlimits.get(resource) {
        Ok(limit) => limit,
        Err(e) => return Ok(syscall_error(e, "getrlimit", "Invalid resource")),
    };
    match sc_convert_addr(args.arg2()) {
        Some(rlim) if copy_out_rlimit(&cage.memory, rlim, limit) => Ok(0),
        _ => Ok(syscall_error(Errno::EFAULT, "getrlimit", "Bad address")),
    }
}

pub fn setrlimit_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let resource = sc_convert_sysarg_to_u32(args.arg1());
    if let Err(e) = cage.rlimits.get(resource) {
        return Ok(syscall_error(e, "setrlimit", "Invalid resource"));
    }
    let new = match sc_convert_addr(args.arg2()).and_then(|rlim| copy_in_rlimit(&cage.memory, rlim)) {
        Some(new) => new,
        None => return Ok(syscall_error(Errno::EFAULT, "setrlimit", "Bad address")),
    };
    match cage.rlimits.set(resource, new) {
        Ok(_) => Ok(0),
        Err(e) => Ok(syscall_error(e, "setrlimit", "Cannot set limit")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/prlimit.2.html
///
/// Combined get-and-set on 64-bit fields.  Either pointer may be NULL.  The
/// old-value buffer is checked before the new limit is applied so a bad
/// pointer never leaves the limit changed.
pub fn prlimit64_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let pid = sc_convert_sysarg_to_i32(args.arg1());
    let resource = sc_convert_sysarg_to_u32(args.arg2());
    let newlim = sc_convert_addr(args.arg3());
    let oldlim = sc_convert_addr(args.arg4());
    if !cage.identity.is_self(pid) {
        return Ok(syscall_error(Errno::ESRCH, "prlimit64", "No such process"));
    }
    let mut old = match cage.rlimits.get(resource) {
        Ok(limit) => limit,
        Err(e) => return Ok(syscall_error(e, "prlimit64", "Invalid resource")),
    };
    if let Some(addr) = oldlim {
        if !cage.memory.check_range(addr, SIZEOF_RLIMIT64, 8) {
            return Ok(syscall_error(Errno::EFAULT, "prlimit64", "Bad address"));
        }
    }
    if let Some(addr) = newlim {
        let new = match copy_in_rlimit64(&cage.memory, addr) {
            Some(new) => new,
            None => return Ok(syscall_error(Errno::EFAULT, "prlimit64", "Bad address")),
        };
        old = match cage.rlimits.set(resource, new) {
            Ok(old) => old,
            Err(e) => return Ok(syscall_error(e, "prlimit64", "Cannot set limit")),
        };
    }
    if let Some(addr) = oldlim {
        copy_out_rlimit64(&cage.memory, addr, old);
    }
    Ok(0)
}

// which/who have to name this process, its group, or its user.
fn check_priority_target(cage: &Cage, which: i32, who: i32, name: &str) -> Result<(), i32> {
    match which {
        PRIO_PROCESS | PRIO_PGRP => {
            if !cage.identity.is_self(who) {
                return Err(syscall_error(Errno::ESRCH, name, "No such process"));
            }
        }
        PRIO_USER => {
            if who != 0 && who as u32 != cage.identity.uid {
                return Err(syscall_error(Errno::ESRCH, name, "No such user"));
            }
        }
        _ => return Err(syscall_error(Errno::EINVAL, name, "Invalid which")),
    }
    Ok(())
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getpriority.2.html
///
/// The raw syscall returns `20 - nice` so the result is never negative.
pub fn getpriority_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let which = sc_convert_sysarg_to_i32(args.arg1());
    let who = sc_convert_sysarg_to_i32(args.arg2());
    if let Err(e) = check_priority_target(cage, which, who, "getpriority") {
        return Ok(e);
    }
    Ok(NICE_TO_PRIO_BASE - cage.identity.nice)
}

/// Nice values are clamped to [-20, 19].  Lowering nice below its current
/// value is only allowed down to the `RLIMIT_NICE` ceiling.
pub fn setpriority_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let which = sc_convert_sysarg_to_i32(args.arg1());
    let who = sc_convert_sysarg_to_i32(args.arg2());
    let nice = sc_convert_sysarg_to_i32(args.arg3()).clamp(NICE_MIN, NICE_MAX);
    if let Err(e) = check_priority_target(cage, which, who, "setpriority") {
        return Ok(e);
    }
    let prio = (NICE_TO_PRIO_BASE - nice) as u64;
    if nice < cage.identity.nice && prio > cage.rlimits.nice_ceiling() {
        return Ok(syscall_error(Errno::EACCES, "setpriority", "Above nice ceiling"));
    }
    cage.identity.nice = nice;
    Ok(0)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/personality.2.html
///
/// Only PER_LINUX with no flags is supported.  0xffffffff just queries.
pub fn personality_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let persona = sc_convert_sysarg_to_u32(args.arg1());
    let old = cage.identity.personality;
    if persona != PER_QUERY {
        if persona & PER_FLAGS_MASK != 0 || persona & PER_MASK != PER_LINUX {
            return Ok(syscall_error(Errno::EINVAL, "personality", "Unsupported persona"));
        }
        cage.identity.personality = persona;
    }
    Ok(old as i32)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/umask.2.html
pub fn umask_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let mode = sc_convert_sysarg_to_u32(args.arg1());
    let old = cage.identity.umask;
    cage.identity.umask = mode & UMASK_BITS;
    Ok(old as i32)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/uname.2.html
pub fn uname_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let fields: [&str; UTSNAME_FIELDS as usize] = [
        UTS_SYSNAME,
        &cage.uts.nodename,
        UTS_RELEASE,
        UTS_VERSION,
        UTS_MACHINE,
        &cage.uts.domainname,
    ];
    match sc_convert_addr(args.arg1()) {
        Some(buf) if copy_out_utsname(&cage.memory, buf, fields) => Ok(0),
        _ => Ok(syscall_error(Errno::EFAULT, "uname", "Bad address")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getrandom.2.html
///
/// Entropy is drawn from the host in fixed-size chunks until the whole
/// buffer is covered.  The buffer is bounds-checked as a whole first.
pub fn getrandom_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let buflen = sc_convert_sysarg_to_usize(args.arg2()).min(i32::MAX as usize);
    let flags = sc_convert_sysarg_to_u32(args.arg3());
    if flags & !(GRND_NONBLOCK | GRND_RANDOM) != 0 {
        return Ok(syscall_error(Errno::EINVAL, "getrandom", "Invalid flags"));
    }
    if buflen == 0 {
        return Ok(0);
    }
    let buf = match sc_convert_addr(args.arg1()) {
        Some(buf) if cage.memory.check_range(buf, buflen as u32, 1) => buf,
        _ => return Ok(syscall_error(Errno::EFAULT, "getrandom", "Bad address")),
    };

    let mut chunk = [0u8; GETRANDOM_CHUNK];
    let mut done = 0usize;
    while done < buflen {
        let len = (buflen - done).min(GETRANDOM_CHUNK);
        if let Err(e) = cage.host.random.fill(&mut chunk[..len]) {
            return Ok(syscall_error(e, "getrandom", "Entropy source failed"));
        }
        cage.memory.write_bytes(buf + done as u32, &chunk[..len]);
        done += len;
    }
    Ok(buflen as i32)
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getrusage.2.html
///
/// Everything reads as zero except the resident set size, which is the
/// current size of guest memory in kilobytes.  Children have used nothing.
pub fn getrusage_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let who = sc_convert_sysarg_to_i32(args.arg1());
    let maxrss = match who {
        RUSAGE_SELF | RUSAGE_THREAD => {
            let kb = cage.memory.usage() / 1024;
            Some(u32::try_from(kb).unwrap_or(u32::MAX))
        }
        RUSAGE_CHILDREN => None,
        _ => return Ok(syscall_error(Errno::EINVAL, "getrusage", "Invalid who")),
    };
    match sc_convert_addr(args.arg2()) {
        Some(ru) if copy_out_rusage(&cage.memory, ru, maxrss) => Ok(0),
        _ => Ok(syscall_error(Errno::EFAULT, "getrusage", "Bad address")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getcpu.2.html
///
/// Always CPU 0 on node 0.  NULL pointers are skipped.
pub fn getcpu_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let targets = [args.arg1(), args.arg2()].map(sc_convert_addr);
    for addr in targets.iter().flatten() {
        if !cage.memory.check_range(*addr, 4, 4) {
            return Ok(syscall_error(Errno::EFAULT, "getcpu", "Bad address"));
        }
    }
    for addr in targets.iter().flatten() {
        cage.memory.write_u32(*addr, 0);
    }
    Ok(0)
}
