//! Top level argument API
//!
//! A syscall is invoked with up to six raw register values.  Unused
//! positions carry [`UNUSED_ARG`].
use sysdefs::constants::lind_platform_const::UNUSED_ARG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallArgs {
    pub args: [u64; 6],
}

impl SyscallArgs {
    /// Pad `given` out to six registers.  Extra values past the sixth are
    /// ignored.
    pub fn new(given: &[u64]) -> Self {
        let mut args = [UNUSED_ARG; 6];
        for (slot, value) in args.iter_mut().zip(given) {
            *slot = *value;
        }
        SyscallArgs { args }
    }

    /// No arguments.
    pub fn none() -> Self {
        Self::new(&[])
    }

    pub fn arg1(&self) -> u64 {
        self.args[0]
    }

    pub fn arg2(&self) -> u64 {
        self.args[1]
    }

    pub fn arg3(&self) -> u64 {
        self.args[2]
    }

    pub fn arg4(&self) -> u64 {
        self.args[3]
    }
}

impl From<&[u64]> for SyscallArgs {
    fn from(given: &[u64]) -> Self {
        Self::new(given)
    }
}
