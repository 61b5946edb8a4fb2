// This file exists to make it easier to vary a single file of constants
// instead of editing the implementation...

/// Hard ceiling on the number of fds a table will hand out, regardless of
/// the `RLIMIT_NOFILE` the caller passes in.
pub const FD_PER_PROCESS_MAX: u64 = 4096;

/// Identifier of a file object within one [`crate::FdTable`].
pub type FileId = u64;

/// This is a table entry, looked up by virtual fd.
#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq)]
pub struct FDTableEntry {
    /// The file object this descriptor refers to.  Several entries may
    /// share one id after a dup.
    pub fileid: FileId,
    /// Should I close this on exec?  Exec is never supported, so this is
    /// only ever reported back, never acted on.
    pub should_cloexec: bool,
    /// Per-descriptor flags as passed to dup3.  These may differ between
    /// 'dup'ed copies of a fd.
    pub perfdinfo: u32,
}
