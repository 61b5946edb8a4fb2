#![allow(dead_code)]

// ===== Standard File Descriptors =====
pub const STDIN_FILENO: i32 = 0; // File descriptor for standard input
pub const STDOUT_FILENO: i32 = 1; // File descriptor for standard output
pub const STDERR_FILENO: i32 = 2; // File descriptor for standard error

// ===== File Descriptor Flags =====
// Source: include/uapi/asm-generic/fcntl.h
pub const O_CLOEXEC: u32 = 0o2000000; // Close on exec
