//! This module provides an fdtable, the mapping from the small integers a
//! guest uses as file descriptors to the kernel-side file objects they
//! name.  Each cage owns one [`FdTable`].
//!
//! File objects are refcounted.  Descriptors created by `dup` and friends
//! share the object of the descriptor they copy; the object is disposed of
//! (its host resources released) exactly when the last descriptor naming it
//! is closed.  There is no `open`, so every file object in a table exists
//! from cage start.

// ********************** CLIPPY DISCUSSION **************************** //
// We set base lints to give the fullest, most pedantic feedback possible.
// Though we prefer that they are just warnings during development so that
// build-denial is only enforced in CI.
#![warn(clippy::all, missing_docs, clippy::pedantic)]
// I do a fair amount of casting to usize so that I can index values in arrays.
#![allow(clippy::cast_possible_truncation)]
// ********************* END CLIPPY DISCUSSION ************************* //

// General constants and definitions needed everywhere, like FDTableEntry.
// The * import flattens the namespace so callers get the symbols directly.
mod commonconstants;
pub use commonconstants::*;

mod file;
pub use file::*;

mod fdtable;
pub use fdtable::*;

/// Error values (matching errno in Linux) for the various call Results
pub use sysdefs::constants::err_const::Errno;

/***************************** TESTS FOLLOW ******************************/

// I'm including my unit tests in-line, in this code.
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingSink {
        flushes: AtomicUsize,
    }

    impl ConsoleSink for CountingSink {
        fn flush(&self) {
            self.flushes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn console_table() -> (FdTable, Arc<CountingSink>) {
        let sink = Arc::new(CountingSink::default());
        let table = FdTable::with_stdio(FileKind::Console(sink.clone()));
        (table, sink)
    }

    #[test]
    fn stdio_shares_one_file() {
        let (table, _sink) = console_table();
        let fileid = table.translate_virtual_fd(0).unwrap().fileid;
        assert_eq!(table.translate_virtual_fd(1).unwrap().fileid, fileid);
        assert_eq!(table.translate_virtual_fd(2).unwrap().fileid, fileid);
        assert_eq!(table.refcount(fileid), Some(3));
        assert!(!table.is_valid(3));
    }

    #[test]
    fn close_then_invalid() {
        let (mut table, _sink) = console_table();
        table.close_virtualfd(1).unwrap();
        assert!(!table.is_valid(1));
        assert_eq!(table.close_virtualfd(1), Err(Errno::EBADF));
        assert_eq!(table.close_virtualfd(9999), Err(Errno::EBADF));
    }

    #[test]
    fn console_is_flushed_only_on_last_close() {
        let (mut table, sink) = console_table();
        let fileid = table.translate_virtual_fd(0).unwrap().fileid;
        table.close_virtualfd(0).unwrap();
        table.close_virtualfd(1).unwrap();
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 0);
        assert_eq!(table.refcount(fileid), Some(1));
        table.close_virtualfd(2).unwrap();
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
        assert_eq!(table.refcount(fileid), None);
    }

    #[test]
    fn unused_fd_takes_lowest_slot() {
        let mut table = FdTable::with_stdio(FileKind::NullDevice);
        let fileid = table.translate_virtual_fd(0).unwrap().fileid;
        table.close_virtualfd(1).unwrap();
        assert_eq!(table.get_unused_virtual_fd(fileid, false, 0, 10), Ok(1));
        assert_eq!(table.get_unused_virtual_fd(fileid, false, 0, 10), Ok(3));
        assert_eq!(table.refcount(fileid), Some(4));
    }

    #[test]
    fn unused_fd_respects_limit() {
        let mut table = FdTable::with_stdio(FileKind::NullDevice);
        let fileid = table.translate_virtual_fd(0).unwrap().fileid;
        assert_eq!(
            table.get_unused_virtual_fd(fileid, false, 0, 3),
            Err(Errno::EMFILE)
        );
        assert_eq!(table.refcount(fileid), Some(3));
    }

    #[test]
    fn specific_fd_replaces_occupant() {
        let (mut table, sink) = console_table();
        let fileid = table.translate_virtual_fd(0).unwrap().fileid;
        table.get_specific_virtual_fd(7, fileid, true, 0, 100).unwrap();
        assert!(table.translate_virtual_fd(7).unwrap().should_cloexec);
        assert_eq!(table.refcount(fileid), Some(4));

        // replacing a descriptor with another copy of the same file keeps
        // the file alive
        table.get_specific_virtual_fd(7, fileid, false, 0, 100).unwrap();
        assert_eq!(table.refcount(fileid), Some(4));
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 0);

        assert_eq!(
            table.get_specific_virtual_fd(100, fileid, false, 0, 100),
            Err(Errno::EBADF)
        );
    }

    #[test]
    fn close_all_disposes_everything() {
        let (mut table, sink) = console_table();
        let fileid = table.translate_virtual_fd(0).unwrap().fileid;
        table.get_unused_virtual_fd(fileid, false, 0, 10).unwrap();
        table.close_all();
        assert_eq!(table.open_fd_count(), 0);
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }
}
