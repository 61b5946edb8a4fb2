//! Basic primitive type conversion API
//!
//! Every syscall argument arrives as a `u64` register value.  These helpers
//! reinterpret it as the C type the syscall declares.
//! Function naming convention:
//! - All functions starting with `sc_` are **public APIs** used by the
//!   syscall implementations. Example: `sc_convert_sysarg_to_i32`.
//! - All other functions are internal helpers.
use sysdefs::constants::lind_platform_const::GUEST_NULL;

/// `sc_convert_sysarg_to_i32` takes the low 32 bits of an argument as a
/// signed `int`.  Guests are 32-bit, so a negative int may arrive either
/// zero-extended or sign-extended; both yield the same value.
pub fn sc_convert_sysarg_to_i32(arg: u64) -> i32 {
    arg as u32 as i32
}

/// Low 32 bits as `unsigned int` (also `uid_t`, `gid_t`, `clockid_t`).
pub fn sc_convert_sysarg_to_u32(arg: u64) -> u32 {
    arg as u32
}

/// `size_t` on a 32-bit guest.
pub fn sc_convert_sysarg_to_usize(arg: u64) -> usize {
    arg as u32 as usize
}

/// A guest pointer: a 32-bit offset into linear memory.  NULL comes back
/// as `None`; callers decide whether that means "skip" or `EFAULT`.
pub fn sc_convert_addr(arg: u64) -> Option<u32> {
    match arg as u32 {
        GUEST_NULL => None,
        addr => Some(addr),
    }
}
