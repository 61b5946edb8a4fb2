// Descriptor syscall tests
//
// fds 0-2 start out sharing one stdio file; dup/dup2/dup3 make more
// references to it and close drops them.

use crate::syscalls::fs_calls::*;
use crate::syscalls::net_calls::*;
use crate::tests::*;
use sysdefs::constants::err_const::Errno;
use sysdefs::constants::fs_const::O_CLOEXEC;
use sysdefs::constants::sys_const::RLIMIT_NOFILE;
use sysdefs::data::sys_struct::Rlimit;

fn stdio_fileid(cage: &cage::Cage) -> u64 {
    cage.fdtable.translate_virtual_fd(0).unwrap().fileid
}

/// Test: dup picks the lowest free slot and shares the file
#[test]
fn test_dup_lowest_free_slot() {
    let mut cage = test_cage();
    let file = stdio_fileid(&cage);
    assert_eq!(call(&mut cage, dup_syscall, &[1]), Ok(3));
    assert_eq!(cage.fdtable.refcount(file), Some(4));

    assert_eq!(call(&mut cage, close_syscall, &[0]), Ok(0));
    assert_eq!(call(&mut cage, dup_syscall, &[2]), Ok(0));
    assert_eq!(cage.fdtable.refcount(file), Some(4));
}

/// Test: dup of a closed or negative fd is EBADF
#[test]
fn test_dup_bad_fd() {
    let mut cage = test_cage();
    assert_eq!(call(&mut cage, dup_syscall, &[7]), err(Errno::EBADF));
    assert_eq!(call(&mut cage, dup_syscall, &[neg(-1)]), err(Errno::EBADF));
}

/// Test: dup fails with EMFILE once every slot below RLIMIT_NOFILE is taken
#[test]
fn test_dup_respects_nofile_limit() {
    let mut cage = test_cage();
    cage.rlimits
        .set(RLIMIT_NOFILE, Rlimit { rlim_cur: 4, rlim_max: 4 })
        .unwrap();
    assert_eq!(call(&mut cage, dup_syscall, &[0]), Ok(3));
    assert_eq!(call(&mut cage, dup_syscall, &[0]), err(Errno::EMFILE));
}

/// Test: dup2 onto itself only validates the descriptor
#[test]
fn test_dup2_same_fd() {
    let mut cage = test_cage();
    let file = stdio_fileid(&cage);
    assert_eq!(call(&mut cage, dup2_syscall, &[2, 2]), Ok(2));
    assert_eq!(cage.fdtable.refcount(file), Some(3));
    assert_eq!(call(&mut cage, dup2_syscall, &[9, 9]), err(Errno::EBADF));
}

/// Test: dup2 onto an open fd replaces it without leaking a reference
#[test]
fn test_dup2_replaces_open_fd() {
    let mut cage = test_cage();
    let file = stdio_fileid(&cage);
    assert_eq!(call(&mut cage, dup2_syscall, &[0, 1]), Ok(1));
    assert_eq!(cage.fdtable.refcount(file), Some(3));

    assert_eq!(call(&mut cage, dup2_syscall, &[0, 10]), Ok(10));
    assert_eq!(cage.fdtable.refcount(file), Some(4));
    assert_eq!(cage.fdtable.open_fd_count(), 4);
}

/// Test: dup2 rejects a target at or above the open-file limit
#[test]
fn test_dup2_out_of_range() {
    let mut cage = test_cage();
    let nofile = cage.rlimits.nofile();
    assert_eq!(call(&mut cage, dup2_syscall, &[0, nofile]), err(Errno::EBADF));
    assert_eq!(call(&mut cage, dup2_syscall, &[0, neg(-3)]), err(Errno::EBADF));
    assert_eq!(call(&mut cage, dup2_syscall, &[5, 6]), err(Errno::EBADF));
    assert!(call(&mut cage, dup2_syscall, &[0, nofile - 1]).unwrap() > 0);
}

/// Test: dup3 refuses equal fds and unknown flags
#[test]
fn test_dup3_validation() {
    let mut cage = test_cage();
    assert_eq!(call(&mut cage, dup3_syscall, &[1, 1, 0]), err(Errno::EINVAL));
    assert_eq!(call(&mut cage, dup3_syscall, &[1, 4, 0o4000]), err(Errno::EINVAL));
    assert!(!cage.fdtable.is_valid(4));
}

/// Test: dup3 with O_CLOEXEC marks only the new descriptor
#[test]
fn test_dup3_cloexec() {
    let mut cage = test_cage();
    assert_eq!(
        call(&mut cage, dup3_syscall, &[1, 5, u64::from(O_CLOEXEC)]),
        Ok(5)
    );
    assert!(cage.fdtable.translate_virtual_fd(5).unwrap().should_cloexec);
    assert!(!cage.fdtable.translate_virtual_fd(1).unwrap().should_cloexec);
    assert_eq!(call(&mut cage, dup3_syscall, &[1, 6, 0]), Ok(6));
    assert!(!cage.fdtable.translate_virtual_fd(6).unwrap().should_cloexec);
}

/// Test: closing twice is EBADF, closing the last reference disposes the file
#[test]
fn test_close_drops_references() {
    let mut cage = test_cage();
    let file = stdio_fileid(&cage);
    assert_eq!(call(&mut cage, close_syscall, &[1]), Ok(0));
    assert!(!cage.fdtable.is_valid(1));
    assert_eq!(call(&mut cage, close_syscall, &[1]), err(Errno::EBADF));
    assert_eq!(call(&mut cage, close_syscall, &[5000]), err(Errno::EBADF));
    assert_eq!(cage.fdtable.refcount(file), Some(2));
    assert_eq!(call(&mut cage, close_syscall, &[0]), Ok(0));
    assert_eq!(call(&mut cage, close_syscall, &[2]), Ok(0));
    assert_eq!(cage.fdtable.refcount(file), None);
    assert_eq!(call(&mut cage, close_syscall, &[neg(-1)]), err(Errno::EBADF));
}

/// Test: nothing is ever a socket
#[test]
fn test_socket_calls() {
    let mut cage = test_cage();
    assert_eq!(call(&mut cage, socket_syscall, &[2, 1, 0]), err(Errno::EAFNOSUPPORT));
    assert_eq!(call(&mut cage, fd_not_sock_syscall, &[1]), err(Errno::ENOTSOCK));
    assert_eq!(call(&mut cage, fd_not_sock_syscall, &[42]), err(Errno::EBADF));
    assert_eq!(call(&mut cage, fd_not_sock_syscall, &[neg(-1)]), err(Errno::EBADF));
}
