//! RawPOSIX: the Linux syscall surface a WASM guest sees.
//!
//! A host that runs a guest module builds one [`Cage`](cage::Cage) with
//! [`rawposix_start`] and then forwards every syscall import to
//! [`lind_syscall_api`] (by number) or [`syscall_by_name`] (by import
//! name).  Results are plain Linux return values; exit and fatal signals
//! come back as a [`SyscallOutcome`] that tells the host to stop the guest.
pub mod dispatcher;
pub mod init;
pub mod syscall_table;
pub mod syscalls;

pub use dispatcher::{is_known_syscall, lind_syscall_api, syscall_by_name, SyscallOutcome};
pub use init::{rawposix_shutdown, rawposix_start};
pub use syscalls::{RawCallFunc, SyscallReturn};

#[cfg(test)]
mod tests;
