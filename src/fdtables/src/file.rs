use std::fmt;
use std::sync::Arc;

/// Where a console file object sends its output.  The host owns the real
/// stream; the kernel only needs to flush it when the console goes away.
pub trait ConsoleSink: Send + Sync {
    /// Push any buffered output out to the host.
    fn flush(&self);
}

/// The variants of kernel-side file.  Only the standard streams ever
/// exist, so there are exactly two.
#[derive(Clone)]
pub enum FileKind {
    /// Bound to the host's console sink.
    Console(Arc<dyn ConsoleSink>),
    /// Swallows everything.  Used for stdio when the host has no console.
    NullDevice,
}

impl fmt::Debug for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Console(_) => f.write_str("Console"),
            FileKind::NullDevice => f.write_str("NullDevice"),
        }
    }
}

/// A refcounted kernel-side file.  `refs` is the number of descriptors
/// naming it and never drops below one while the object is live.
#[derive(Debug)]
pub struct FileObject {
    kind: FileKind,
    refs: u64,
}

impl FileObject {
    /// A fresh object held by `refs` descriptors.
    #[must_use]
    pub fn new(kind: FileKind, refs: u64) -> Self {
        FileObject { kind, refs }
    }

    /// The variant of this file.
    #[must_use]
    pub fn kind(&self) -> &FileKind {
        &self.kind
    }

    /// Number of descriptors currently holding this file.
    #[must_use]
    pub fn refs(&self) -> u64 {
        self.refs
    }

    /// Add a descriptor reference.  Returns the new count.
    pub fn incref(&mut self) -> u64 {
        self.refs += 1;
        self.refs
    }

    /// Drop a descriptor reference.  Returns the remaining count; the caller
    /// must [`dispose`](Self::dispose) the object once this reaches zero.
    pub fn decref(&mut self) -> u64 {
        self.refs = self.refs.saturating_sub(1);
        self.refs
    }

    /// Release whatever the file holds on the host side.
    pub fn dispose(self) {
        match self.kind {
            FileKind::Console(sink) => {
                log::debug!("fdtables: disposing console file");
                sink.flush();
            }
            FileKind::NullDevice => {
                log::debug!("fdtables: disposing null device");
            }
        }
    }
}
