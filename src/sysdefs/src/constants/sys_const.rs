#![allow(dead_code)]

// ===== User and Group ID Constants =====
// Lind-specific default values
pub const DEFAULT_UID: u32 = 1000; // Default user ID
pub const DEFAULT_GID: u32 = 1000; // Default group ID

// ===== Process Identity =====
// There is exactly one process in a cage and it always sees itself as pid 1.
pub const GUEST_PID: i32 = 1;
pub const GUEST_PPID: i32 = 0;
pub const DEFAULT_UMASK: u32 = 0o002;
pub const UMASK_BITS: u32 = 0o777;

// ===== Resource Limits =====
// Source: include/uapi/asm-generic/resource.h
pub const RLIMIT_CPU: u32 = 0; // CPU time in sec
pub const RLIMIT_FSIZE: u32 = 1; // Maximum filesize
pub const RLIMIT_DATA: u32 = 2; // Max data size
pub const RLIMIT_STACK: u32 = 3; // Max stack size
pub const RLIMIT_CORE: u32 = 4; // Max core file size
pub const RLIMIT_RSS: u32 = 5; // Max resident set size
pub const RLIMIT_NPROC: u32 = 6; // Max number of processes
pub const RLIMIT_NOFILE: u32 = 7; // Max number of open files
pub const RLIMIT_MEMLOCK: u32 = 8; // Max locked-in-memory address space
pub const RLIMIT_AS: u32 = 9; // Address space limit
pub const RLIMIT_LOCKS: u32 = 10; // Maximum file locks held
pub const RLIMIT_SIGPENDING: u32 = 11; // Max number of pending signals
pub const RLIMIT_MSGQUEUE: u32 = 12; // Maximum bytes in POSIX mqueues
pub const RLIMIT_NICE: u32 = 13; // Max nice prio allowed to raise to
pub const RLIMIT_RTPRIO: u32 = 14; // Maximum realtime priority
pub const RLIM_NLIMITS: usize = 15;

/// Compiled-in (cur == max) value of each resource limit, indexed by
/// resource id.
pub const DEFAULT_RLIMITS: [u64; RLIM_NLIMITS] = [
    0xffff_ffff, // cpu
    0xffff_ffff, // fsize
    0xffff_ffff, // data
    0x00ff_ffff, // stack
    0,           // core
    0xffff_ffff, // rss
    1,           // nproc
    4096,        // nofile
    0xffff,      // memlock
    0xffff_ffff, // as
    0xffff,      // locks
    0xffff,      // sigpending
    0xffff_ffff, // msgqueue
    20,          // nice
    0,           // rtprio
];

// ===== Scheduling Priority =====
// Source: include/uapi/linux/resource.h
pub const PRIO_PROCESS: i32 = 0;
pub const PRIO_PGRP: i32 = 1;
pub const PRIO_USER: i32 = 2;
pub const NICE_MIN: i32 = -20;
pub const NICE_MAX: i32 = 19;
// The kernel reports priorities as 20 - nice so the value is never negative
pub const NICE_TO_PRIO_BASE: i32 = 20;

// ===== Resource Usage =====
pub const RUSAGE_SELF: i32 = 0;
pub const RUSAGE_THREAD: i32 = 1;
pub const RUSAGE_CHILDREN: i32 = -1;

// ===== Clocks =====
// Source: include/uapi/linux/time.h
pub const CLOCK_REALTIME: u32 = 0;
pub const CLOCK_MONOTONIC: u32 = 1;
pub const REALTIME_RESOLUTION_NS: u64 = 15_000_000;
pub const MONOTONIC_RESOLUTION_NS: u64 = 1_000;
pub const NSEC_PER_SEC: u64 = 1_000_000_000;
pub const USER_HZ: u64 = 100; // clock ticks reported by times()

// Source: include/uapi/linux/timex.h
pub const ADJ_OFFSET_SS_READ: u32 = 0xa001;
pub const TIME_OK: i32 = 0;

// ===== getrandom =====
pub const GRND_NONBLOCK: u32 = 0x0001;
pub const GRND_RANDOM: u32 = 0x0002;
pub const GETRANDOM_CHUNK: usize = 256; // bytes drawn from the host per fill

// ===== personality =====
pub const PER_LINUX: u32 = 0x0000;
pub const PER_QUERY: u32 = 0xffff_ffff;
pub const PER_FLAGS_MASK: u32 = 0xffff_ff00;
pub const PER_MASK: u32 = 0x00ff;

// ===== utsname =====
pub const UTS_SYSNAME: &str = "rawposix";
pub const UTS_NODENAME: &str = "localhost";
pub const UTS_RELEASE: &str = "1.0";
pub const UTS_VERSION: &str = "#1";
pub const UTS_MACHINE: &str = "WebAssembly on JavaScript";

// ===== Signal Constants =====
// Source: include/uapi/asm-generic/signal.h
// Reference: https://man7.org/linux/man-pages/man7/signal.7.html
pub const SIGNAL_MAX: i32 = 64; // Maximum number of signals

pub const SIGHUP: i32 = 1; // Hangup
pub const SIGINT: i32 = 2; // Interrupt (Ctrl+C)
pub const SIGQUIT: i32 = 3; // Quit (Ctrl+\)
pub const SIGILL: i32 = 4; // Illegal instruction
pub const SIGTRAP: i32 = 5; // Trace/breakpoint trap
pub const SIGABRT: i32 = 6; // Abort program
pub const SIGBUS: i32 = 7; // Bus error (bad memory access)
pub const SIGFPE: i32 = 8; // Floating point exception
pub const SIGKILL: i32 = 9; // Kill, unblockable
pub const SIGUSR1: i32 = 10; // User-defined signal 1
pub const SIGSEGV: i32 = 11; // Segmentation violation
pub const SIGUSR2: i32 = 12; // User-defined signal 2
pub const SIGPIPE: i32 = 13; // Broken pipe
pub const SIGALRM: i32 = 14; // Timer signal from alarm(2)
pub const SIGTERM: i32 = 15; // Termination request
pub const SIGCHLD: i32 = 17; // Child stopped or terminated
pub const SIGCONT: i32 = 18; // Continue if stopped
pub const SIGSTOP: i32 = 19; // Stop process
