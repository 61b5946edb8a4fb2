//! This module contains actual syscall implementation in RawPOSIX
//!
//! Every handler has the same shape: it takes the cage the call is made
//! in plus the raw argument registers, converts its own arguments, and
//! returns either a plain syscall result (`>= 0` success, `< 0` negated
//! errno) or a [`Termination`] when the call ends the process.
pub mod fs_calls;
pub mod net_calls;
pub mod sys_calls;
pub mod time_calls;
pub mod unsupported;

use cage::{Cage, Termination};
use typemap::syscall_conv::SyscallArgs;

/// What a handler hands back to the dispatcher.
pub type SyscallReturn = Result<i32, Termination>;

/// Function signature for a RawPOSIX syscall handler.
pub type RawCallFunc = fn(cage: &mut Cage, args: &SyscallArgs) -> SyscallReturn;
