//! Per-cage settings the host can hand in at startup.
use serde::{Deserialize, Serialize};
use sysdefs::constants::sys_const::{DEFAULT_GID, DEFAULT_UID, DEFAULT_UMASK, UTS_NODENAME};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CageConfig {
    pub uid: u32,
    pub gid: u32,
    /// supplementary groups
    pub groups: Vec<u32>,
    pub umask: u32,
    pub nodename: String,
    pub domainname: String,
    /// Anything above 0 logs every failed syscall.
    pub verbosity: isize,
    /// Bind fds 0-2 to the host console when the host provides one.
    pub console: bool,
}

impl Default for CageConfig {
    fn default() -> Self {
        CageConfig {
            uid: DEFAULT_UID,
            gid: DEFAULT_GID,
            groups: Vec::new(),
            umask: DEFAULT_UMASK,
            nodename: UTS_NODENAME.to_string(),
            domainname: String::new(),
            verbosity: 0,
            console: true,
        }
    }
}

impl CageConfig {
    /// Decode a CBOR-packed config.  Missing fields take their defaults.
    pub fn from_cbor(blob: &[u8]) -> Result<Self, serde_cbor::Error> {
        serde_cbor::from_slice(blob)
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn partial_blob_fills_defaults() {
        let mut partial = BTreeMap::new();
        partial.insert("uid", 42u32);
        let blob = serde_cbor::to_vec(&partial).unwrap();
        let config = CageConfig::from_cbor(&blob).unwrap();
        assert_eq!(config.uid, 42);
        assert_eq!(config.gid, DEFAULT_GID);
        assert_eq!(config.nodename, "localhost");
        assert!(config.console);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(CageConfig::from_cbor(&[0xff, 0x00, 0x13]).is_err());
    }

    #[test]
    fn packed_config_keeps_groups() {
        let config = CageConfig {
            groups: vec![4, 24],
            ..CageConfig::default()
        };
        let back = CageConfig::from_cbor(&config.to_cbor().unwrap()).unwrap();
        assert_eq!(back.groups, vec![4, 24]);
    }
}
