//! Descriptor syscalls.
//!
//! There is no open(), so the only descriptors are the three standard
//! streams and copies of them made here.
use super::SyscallReturn;
use cage::Cage;
use sysdefs::constants::err_const::{syscall_error, Errno};
use sysdefs::constants::fs_const::O_CLOEXEC;
use typemap::datatype_conversion::*;
use typemap::syscall_conv::SyscallArgs;

/// Reference to Linux: https://man7.org/linux/man-pages/man2/close.2.html
///
/// Drops the descriptor's reference on its file; the file itself goes away
/// with its last descriptor.
pub fn close_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let fd = sc_convert_sysarg_to_i32(args.arg1());
    if fd < 0 {
        return Ok(syscall_error(Errno::EBADF, "close", "Bad File Descriptor"));
    }
    match cage.fdtable.close_virtualfd(fd as u64) {
        Ok(()) => Ok(0),
        Err(e) => Ok(syscall_error(e, "close", "Bad File Descriptor")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/dup.2.html
///
/// The copy goes in the lowest free slot below `RLIMIT_NOFILE` and shares
/// the file `fd` refers to.  Flags are not copied.
pub fn dup_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let fd = sc_convert_sysarg_to_i32(args.arg1());
    if fd < 0 {
        return Ok(syscall_error(Errno::EBADF, "dup", "Bad File Descriptor"));
    }
    let entry = match cage.fdtable.translate_virtual_fd(fd as u64) {
        Ok(entry) => entry,
        Err(e) => return Ok(syscall_error(e, "dup", "Bad File Descriptor")),
    };
    let limit = cage.rlimits.nofile();
    match cage
        .fdtable
        .get_unused_virtual_fd(entry.fileid, false, 0, limit)
    {
        Ok(newfd) => Ok(newfd as i32),
        Err(e) => Ok(syscall_error(e, "dup", "Too many open files")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/dup2.2.html
///
/// Duplicating a descriptor onto itself only checks that it is open.
pub fn dup2_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let oldfd = sc_convert_sysarg_to_i32(args.arg1());
    let newfd = sc_convert_sysarg_to_i32(args.arg2());
    if oldfd == newfd {
        if oldfd >= 0 && cage.fdtable.is_valid(oldfd as u64) {
            return Ok(newfd);
        }
        return Ok(syscall_error(Errno::EBADF, "dup2", "Bad File Descriptor"));
    }
    Ok(install_copy(cage, oldfd, newfd, 0, "dup2"))
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/dup3.2.html
///
/// Unlike dup2, equal descriptors are an error, and `O_CLOEXEC` is the only
/// flag accepted.
pub fn dup3_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let oldfd = sc_convert_sysarg_to_i32(args.arg1());
    let newfd = sc_convert_sysarg_to_i32(args.arg2());
    let flags = sc_convert_sysarg_to_u32(args.arg3());
    if oldfd == newfd {
        return Ok(syscall_error(Errno::EINVAL, "dup3", "oldfd equals newfd"));
    }
    if flags & !O_CLOEXEC != 0 {
        return Ok(syscall_error(Errno::EINVAL, "dup3", "Invalid flags"));
    }
    Ok(install_copy(cage, oldfd, newfd, flags, "dup3"))
}

// Shared tail of dup2 and dup3 once the equal-fd case is out of the way.
// Any occupant of `newfd` is closed by the table as part of the install.
fn install_copy(cage: &mut Cage, oldfd: i32, newfd: i32, flags: u32, name: &str) -> i32 {
    if oldfd < 0 {
        return syscall_error(Errno::EBADF, name, "Bad File Descriptor");
    }
    let entry = match cage.fdtable.translate_virtual_fd(oldfd as u64) {
        Ok(entry) => entry,
        Err(e) => return syscall_error(e, name, "Bad File Descriptor"),
    };
    let limit = cage.rlimits.nofile();
    if newfd < 0 || newfd as u64 >= limit {
        return syscall_error(Errno::EBADF, name, "newfd is out of range");
    }
    match cage.fdtable.get_specific_virtual_fd(
        newfd as u64,
        entry.fileid,
        flags & O_CLOEXEC != 0,
        flags,
        limit,
    ) {
        Ok(()) => newfd,
        Err(e) => syscall_error(e, name, "Bad File Descriptor"),
    }
}
