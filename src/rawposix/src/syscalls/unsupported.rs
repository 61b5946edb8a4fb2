//! Calls that exist in the table only to fail.
use super::SyscallReturn;
use cage::Cage;
use sysdefs::constants::err_const::{syscall_error, Errno};
use typemap::syscall_conv::SyscallArgs;

/// Deferred or permanently unsupported (fork/exec/wait, file I/O, ...).
pub fn enosys_syscall(_cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(syscall_error(Errno::ENOSYS, "unsupported", "Not implemented"))
}

/// Calls that need root (chroot, reboot, sethostname, ...).
pub fn eperm_syscall(_cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(syscall_error(Errno::EPERM, "privileged", "Operation not permitted"))
}
