//! The single process a cage runs.
use crate::config::CageConfig;
use sysdefs::constants::sys_const::{GUEST_PID, GUEST_PPID, PER_LINUX, UMASK_BITS};

/// Id value the set*id family uses for "leave this one alone".
pub const ID_UNCHANGED: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub pid: i32,
    pub ppid: i32,
    pub uid: u32,
    pub gid: u32,
    pub groups: Vec<u32>,
    pub nice: i32,
    pub umask: u32,
    pub personality: u32,
}

impl ProcessIdentity {
    pub fn from_config(config: &CageConfig) -> Self {
        ProcessIdentity {
            pid: GUEST_PID,
            ppid: GUEST_PPID,
            uid: config.uid,
            gid: config.gid,
            groups: config.groups.clone(),
            nice: 0,
            umask: config.umask & UMASK_BITS,
            personality: PER_LINUX,
        }
    }

    /// pid 0 means "the caller" in every call that takes a pid.
    pub fn is_self(&self, pid: i32) -> bool {
        pid == 0 || pid == self.pid
    }

    /// The thread, process group and session all share the pid.
    pub fn tid(&self) -> i32 {
        self.pid
    }

    pub fn pgid(&self) -> i32 {
        self.pid
    }

    pub fn sid(&self) -> i32 {
        self.pid
    }
}

/// Whether a requested id is a no-op against `current`: either the
/// "unchanged" marker or the id already held.  There is only one user, so
/// this is the only way an identity call can succeed.
pub fn id_unchanged(current: u32, requested: u32) -> bool {
    requested == ID_UNCHANGED || requested == current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_config() {
        let ident = ProcessIdentity::from_config(&CageConfig::default());
        assert_eq!(ident.pid, 1);
        assert_eq!(ident.uid, 1000);
        assert_eq!(ident.umask, 0o002);
        assert!(ident.groups.is_empty());
        assert!(ident.is_self(0));
        assert!(ident.is_self(1));
        assert!(!ident.is_self(2));
    }

    #[test]
    fn unchanged_ids() {
        assert!(id_unchanged(1000, 1000));
        assert!(id_unchanged(1000, ID_UNCHANGED));
        assert!(!id_unchanged(1000, 0));
    }
}
