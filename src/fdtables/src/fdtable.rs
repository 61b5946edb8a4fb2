use crate::commonconstants::{FDTableEntry, FileId, FD_PER_PROCESS_MAX};
use crate::file::{FileKind, FileObject};
use std::collections::HashMap;
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::fs_const::{STDERR_FILENO, STDIN_FILENO};

/// One cage's descriptor table together with the file objects its
/// descriptors refer to.
#[derive(Debug, Default)]
pub struct FdTable {
    fds: HashMap<u64, FDTableEntry>,
    files: HashMap<FileId, FileObject>,
    nextfileid: FileId,
}

impl FdTable {
    /// An empty table with no files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table whose fds 0, 1 and 2 all refer to one shared file of the
    /// given kind (refcount 3).
    #[must_use]
    pub fn with_stdio(kind: FileKind) -> Self {
        let mut table = Self::new();
        let fileid = table.add_file(kind, 3);
        for fd in STDIN_FILENO..=STDERR_FILENO {
            table.fds.insert(
                fd as u64,
                FDTableEntry {
                    fileid,
                    should_cloexec: false,
                    perfdinfo: 0,
                },
            );
        }
        table
    }

    // Register a new file object and hand back its id.  The caller is
    // responsible for inserting `refs` entries that point at it.
    fn add_file(&mut self, kind: FileKind, refs: u64) -> FileId {
        let fileid = self.nextfileid;
        self.nextfileid += 1;
        self.files.insert(fileid, FileObject::new(kind, refs));
        fileid
    }

    /// A slot is valid iff it is in bounds and occupied.
    #[must_use]
    pub fn is_valid(&self, virtualfd: u64) -> bool {
        self.fds.contains_key(&virtualfd)
    }

    /// Look up the entry behind a virtual fd.
    ///
    /// # Errors
    /// `EBADF` if the fd is not open.
    pub fn translate_virtual_fd(&self, virtualfd: u64) -> Result<FDTableEntry, Errno> {
        match self.fds.get(&virtualfd) {
            Some(entry) => Ok(*entry),
            None => Err(Errno::EBADF),
        }
    }

    /// The kind of file an open fd refers to.
    #[must_use]
    pub fn file_kind(&self, virtualfd: u64) -> Option<&FileKind> {
        let entry = self.fds.get(&virtualfd)?;
        self.files.get(&entry.fileid).map(FileObject::kind)
    }

    /// Current refcount of a file object, `None` once it has been disposed.
    #[must_use]
    pub fn refcount(&self, fileid: FileId) -> Option<u64> {
        self.files.get(&fileid).map(FileObject::refs)
    }

    /// Number of open descriptors.
    #[must_use]
    pub fn open_fd_count(&self) -> usize {
        self.fds.len()
    }

    // Checking the fds in order is the slow path, but a cage has few
    // descriptors and this needs the lowest free one anyway.
    /// Install a new descriptor for `fileid` in the lowest free slot below
    /// `limit`, taking a reference on the file.
    ///
    /// # Errors
    /// `EMFILE` if every slot below `limit` is taken, `EBADF` if `fileid`
    /// does not name a live file.
    pub fn get_unused_virtual_fd(
        &mut self,
        fileid: FileId,
        should_cloexec: bool,
        perfdinfo: u32,
        limit: u64,
    ) -> Result<u64, Errno> {
        if !self.files.contains_key(&fileid) {
            return Err(Errno::EBADF);
        }
        let limit = limit.min(FD_PER_PROCESS_MAX);

        for fdcandidate in 0..limit {
            if let std::collections::hash_map::Entry::Vacant(e) = self.fds.entry(fdcandidate) {
                e.insert(FDTableEntry {
                    fileid,
                    should_cloexec,
                    perfdinfo,
                });
                self._increment_file(fileid);
                return Ok(fdcandidate);
            }
        }

        // I must have checked all fds and failed to find one open.  Fail!
        Err(Errno::EMFILE)
    }

    /// Install a descriptor for `fileid` at exactly `requested_virtualfd`,
    /// closing whatever occupied that slot first.  This is what dup2/dup3
    /// need.
    ///
    /// # Errors
    /// `EBADF` if `requested_virtualfd` is not below `limit` or `fileid`
    /// does not name a live file.
    pub fn get_specific_virtual_fd(
        &mut self,
        requested_virtualfd: u64,
        fileid: FileId,
        should_cloexec: bool,
        perfdinfo: u32,
        limit: u64,
    ) -> Result<(), Errno> {
        if requested_virtualfd >= limit.min(FD_PER_PROCESS_MAX) {
            return Err(Errno::EBADF);
        }
        if !self.files.contains_key(&fileid) {
            return Err(Errno::EBADF);
        }

        // Increment first so that replacing a descriptor with a copy of a
        // descriptor for the same file never drops that file to zero.
        self._increment_file(fileid);

        let oldentry = self.fds.insert(
            requested_virtualfd,
            FDTableEntry {
                fileid,
                should_cloexec,
                perfdinfo,
            },
        );
        if let Some(entry) = oldentry {
            self._decrement_file(entry.fileid);
        }
        Ok(())
    }

    /// Close a descriptor, releasing its reference on the file.
    ///
    /// # Errors
    /// `EBADF` if the fd is not open.
    pub fn close_virtualfd(&mut self, virtfd: u64) -> Result<(), Errno> {
        match self.fds.remove(&virtfd) {
            Some(entry) => {
                self._decrement_file(entry.fileid);
                Ok(())
            }
            None => Err(Errno::EBADF),
        }
    }

    /// Close every descriptor.  Used when the cage terminates.
    pub fn close_all(&mut self) {
        let entries: Vec<FDTableEntry> = self.fds.drain().map(|(_, entry)| entry).collect();
        for entry in entries {
            self._decrement_file(entry.fileid);
        }
    }

    #[doc(hidden)]
    fn _increment_file(&mut self, fileid: FileId) -> u64 {
        match self.files.get_mut(&fileid) {
            Some(file) => file.incref(),
            None => 0,
        }
    }

    // Drops one reference and disposes of the file when it was the last.
    #[doc(hidden)]
    fn _decrement_file(&mut self, fileid: FileId) -> u64 {
        let newcount = match self.files.get_mut(&fileid) {
            Some(file) => file.decref(),
            None => return 0,
        };
        if newcount == 0 {
            // Remove before disposing so the table never holds a dead file.
            if let Some(file) = self.files.remove(&fileid) {
                file.dispose();
            }
        }
        newcount
    }
}
