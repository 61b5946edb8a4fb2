//! This file contains the Cage structure: all kernel state for one guest,
//! owned by whoever dispatches its syscalls.  There is no global cage
//! table; independent guests in one host simply hold independent cages.
use crate::clock::ClockState;
use crate::config::CageConfig;
use crate::host::HostCapabilities;
use crate::identity::ProcessIdentity;
use crate::memory::{MemoryAccessor, SharedMemory};
use crate::rlimit::RlimitTable;
use crate::signal::Termination;
use fdtables::{FdTable, FileKind};
use std::time::Duration;

/// The strings uname reports that may differ between cages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtsNames {
    pub nodename: String,
    pub domainname: String,
}

#[derive(Debug)]
pub struct Cage {
    pub identity: ProcessIdentity,
    pub rlimits: RlimitTable,
    pub fdtable: FdTable,
    // monotonic bookkeeping, only touched through monotonic_now()
    pub clock: ClockState,
    pub memory: MemoryAccessor,
    pub host: HostCapabilities,
    pub uts: UtsNames,
    // monotonic reading at cage start, the zero point for times()
    pub started: Duration,
}

impl Cage {
    /// Build a cage whose fds 0-2 share one console file, or the null
    /// device if the host has no console or the config turns it off.
    pub fn new(config: &CageConfig, memory: SharedMemory, host: HostCapabilities) -> Self {
        let stdio = match (&host.console, config.console) {
            (Some(sink), true) => FileKind::Console(sink.clone()),
            _ => FileKind::NullDevice,
        };
        log::debug!("cage: starting with stdio on {:?}", stdio);

        let mut cage = Cage {
            identity: ProcessIdentity::from_config(config),
            rlimits: RlimitTable::new(),
            fdtable: FdTable::with_stdio(stdio),
            clock: ClockState::new(),
            memory: MemoryAccessor::new(memory),
            host,
            uts: UtsNames {
                nodename: config.nodename.clone(),
                domainname: config.domainname.clone(),
            },
            started: Duration::ZERO,
        };
        cage.started = cage.monotonic_now();
        cage
    }

    /// Monotonic time as the guest sees it.  Never earlier than the last
    /// value returned.
    pub fn monotonic_now(&mut self) -> Duration {
        let raw = self.host.clock.monotonic();
        self.clock.observe(raw)
    }

    pub fn realtime_now(&self) -> Duration {
        self.host.clock.realtime()
    }

    /// Release every descriptor and pass the termination through.  Called on
    /// the way out of exit and fatal signals.
    pub fn terminate(&mut self, how: Termination) -> Termination {
        log::debug!("cage: terminating: {}", how);
        self.fdtable.close_all();
        how
    }
}
