//! Per-resource (current, maximum) limits.
//!
//! An unprivileged process may lower its ceilings but never raise them, and
//! the current value can never exceed the ceiling.
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::sys_const::{DEFAULT_RLIMITS, RLIMIT_NICE, RLIMIT_NOFILE, RLIM_NLIMITS};
use sysdefs::data::sys_struct::Rlimit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RlimitTable {
    limits: [Rlimit; RLIM_NLIMITS],
}

impl Default for RlimitTable {
    fn default() -> Self {
        RlimitTable {
            limits: DEFAULT_RLIMITS.map(Rlimit::fixed),
        }
    }
}

impl RlimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one resource.  `EINVAL` for an unknown resource id.
    pub fn get(&self, resource: u32) -> Result<Rlimit, Errno> {
        self.limits
            .get(resource as usize)
            .copied()
            .ok_or(Errno::EINVAL)
    }

    /// Replace a resource's limits and return the previous pair.
    ///
    /// `EINVAL` if the resource is unknown or `cur > max`, `EPERM` if the
    /// new maximum is above the old one.  Nothing changes on failure.
    pub fn set(&mut self, resource: u32, new: Rlimit) -> Result<Rlimit, Errno> {
        let old = self.get(resource)?;
        if new.rlim_cur > new.rlim_max {
            return Err(Errno::EINVAL);
        }
        if new.rlim_max > old.rlim_max {
            return Err(Errno::EPERM);
        }
        self.limits[resource as usize] = new;
        Ok(old)
    }

    /// Current open-file limit; the descriptor table never hands out a slot
    /// at or above it.
    pub fn nofile(&self) -> u64 {
        self.limits[RLIMIT_NOFILE as usize].rlim_cur
    }

    /// Current nice ceiling, in the kernel's `20 - nice` form.
    pub fn nice_ceiling(&self) -> u64 {
        self.limits[RLIMIT_NICE as usize].rlim_cur
    }
}
