//! Startup and shutdown of a cage.
use cage::{Cage, CageConfig, HostCapabilities, SharedMemory};
use sysdefs::constants::err_const::VERBOSE;

/// Build the cage for a freshly instantiated guest module.
///
/// The first call in the process fixes the failure-logging verbosity; later
/// calls keep whatever was set first.  The new cage starts with fds 0, 1 and
/// 2 open on one shared stdio file.
///
/// Parameters:
/// - `config`: identity, uname strings and verbosity for this guest.
/// - `memory`: the guest's linear memory.  The host may keep growing it.
/// - `host`: the console, clock and entropy the cage calls out to.
pub fn rawposix_start(config: &CageConfig, memory: SharedMemory, host: HostCapabilities) -> Cage {
    let _ = VERBOSE.set(config.verbosity); //assigned to suppress unused result warning
    let cage = Cage::new(config, memory, host);
    log::debug!(
        "rawposix: cage up, pid {} uid {} gid {}",
        cage.identity.pid,
        cage.identity.uid,
        cage.identity.gid
    );
    cage
}

/// Tear a cage down when the host stops running it without the guest
/// having exited.  Every remaining descriptor is closed.
pub fn rawposix_shutdown(mut cage: Cage) {
    log::debug!(
        "rawposix: shutting down with {} fds open",
        cage.fdtable.open_fd_count()
    );
    cage.fdtable.close_all();
}
