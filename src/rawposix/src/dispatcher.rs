//! Entry point from the host into the kernel: route a syscall to its handler
//! and turn the handler's result into what the host sees.
use crate::syscall_table::{lookup_by_name, lookup_by_number};
use crate::syscalls::RawCallFunc;
use cage::{Cage, Termination};
use sysdefs::constants::err_const::{syscall_error, Errno};
use typemap::syscall_conv::SyscallArgs;

/// Result of one syscall as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallOutcome {
    /// The guest keeps running with this return value (negated errno on
    /// failure).
    Returned(i32),
    /// The guest called exit/exit_group.  The host must stop running it.
    Terminated { status: i32 },
    /// The guest was killed by a signal.  The host must stop running it.
    Signaled { signal: i32 },
}

impl SyscallOutcome {
    pub fn is_termination(&self) -> bool {
        !matches!(self, SyscallOutcome::Returned(_))
    }
}

fn run(cage: &mut Cage, name: &str, func: RawCallFunc, args: &SyscallArgs) -> SyscallOutcome {
    log::trace!("dispatch: {}({:?})", name, args.args);
    match func(cage, args) {
        Ok(ret) => {
            log::trace!("dispatch: {} -> {}", name, ret);
            SyscallOutcome::Returned(ret)
        }
        Err(how) => match cage.terminate(how) {
            Termination::Exited { status } => SyscallOutcome::Terminated { status },
            Termination::Signaled { signal } => SyscallOutcome::Signaled { signal },
        },
    }
}

/// Dispatch syscall `callnum` for `cage`.  Numbers without a handler fail
/// with `ENOSYS`.
pub fn lind_syscall_api(cage: &mut Cage, callnum: u32, args: &SyscallArgs) -> SyscallOutcome {
    match lookup_by_number(callnum) {
        Some((name, func)) => run(cage, name, func, args),
        None => {
            log::debug!("dispatch: no handler for syscall {}", callnum);
            SyscallOutcome::Returned(syscall_error(
                Errno::ENOSYS,
                "lind_syscall_api",
                "Unknown syscall number",
            ))
        }
    }
}

/// Dispatch by import name, for hosts that bind one function per syscall.
/// Returns `None` if the name does not resolve, so the host can refuse to
/// link the module rather than fail at call time.
pub fn syscall_by_name(cage: &mut Cage, name: &str, args: &SyscallArgs) -> Option<SyscallOutcome> {
    let (canonical, func) = lookup_by_name(name)?;
    Some(run(cage, canonical, func, args))
}

/// Whether `name` resolves to a handler.
pub fn is_known_syscall(name: &str) -> bool {
    lookup_by_name(name).is_some()
}
