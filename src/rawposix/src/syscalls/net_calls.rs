//! Socket syscalls.  There is no socket domain in a cage, so no descriptor
//! can ever be a socket.
use super::SyscallReturn;
use cage::Cage;
use sysdefs::constants::err_const::{syscall_error, Errno};
use typemap::datatype_conversion::sc_convert_sysarg_to_i32;
use typemap::syscall_conv::SyscallArgs;

/// Reference to Linux: https://man7.org/linux/man-pages/man2/socket.2.html
pub fn socket_syscall(_cage: &mut Cage, _args: &SyscallArgs) -> SyscallReturn {
    Ok(syscall_error(
        Errno::EAFNOSUPPORT,
        "socket",
        "No address families are supported",
    ))
}

/// Shared by every call whose first argument must be a socket descriptor
/// (accept, accept4, getpeername, getsockname, getsockopt, setsockopt,
/// shutdown).
pub fn fd_not_sock_syscall(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn {
    let fd = sc_convert_sysarg_to_i32(args.arg1());
    if fd >= 0 && cage.fdtable.is_valid(fd as u64) {
        return Ok(syscall_error(Errno::ENOTSOCK, "socket call", "Not a socket"));
    }
    Ok(syscall_error(Errno::EBADF, "socket call", "Bad File Descriptor"))
}
