//! The syscall table: Linux x86_64 syscall number and name to handler.
//!
//! Anything not listed here is unknown.  Unknown numbers fail with
//! `ENOSYS` at dispatch; unknown names cannot be resolved at all, which is
//! how the calls that were never implemented anywhere (afs_syscall,
//! getpmsg, putpmsg, security, tuxcall) stay absent.
use crate::syscalls::fs_calls::*;
use crate::syscalls::net_calls::*;
use crate::syscalls::sys_calls::*;
use crate::syscalls::time_calls::*;
use crate::syscalls::unsupported::*;
use crate::syscalls::RawCallFunc;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Prefix the guest's libc puts on syscall import names.
pub const SYSCALL_IMPORT_PREFIX: &str = "__syscall_";

/// According to the Linux standard
pub const SYSCALL_TABLE: &[(u32, &str, RawCallFunc)] = &[
    // descriptors
    (3, "close", close_syscall),
    (32, "dup", dup_syscall),
    (33, "dup2", dup2_syscall),
    (292, "dup3", dup3_syscall),
    // process and identity
    (39, "getpid", getpid_syscall),
    (110, "getppid", getppid_syscall),
    (186, "gettid", gettid_syscall),
    (102, "getuid", getuid_syscall),
    (107, "geteuid", geteuid_syscall),
    (104, "getgid", getgid_syscall),
    (108, "getegid", getegid_syscall),
    (118, "getresuid", getresuid_syscall),
    (120, "getresgid", getresgid_syscall),
    (115, "getgroups", getgroups_syscall),
    (105, "setuid", setuid_syscall),
    (106, "setgid", setgid_syscall),
    (113, "setreuid", setreuid_syscall),
    (114, "setregid", setregid_syscall),
    (117, "setresuid", setresuid_syscall),
    (119, "setresgid", setresgid_syscall),
    (122, "setfsuid", setfsuid_syscall),
    (123, "setfsgid", setfsgid_syscall),
    (121, "getpgid", getpgid_syscall),
    (111, "getpgrp", getpgrp_syscall),
    (124, "getsid", getsid_syscall),
    (109, "setpgid", setpgid_syscall),
    (62, "kill", kill_syscall),
    (200, "tkill", tkill_syscall),
    (234, "tgkill", tgkill_syscall),
    (60, "exit", exit_syscall),
    (231, "exit_group", exit_group_syscall),
    (97, "getrlimit", getrlimit_syscall),
    (160, "setrlimit", setrlimit_syscall),
    (302, "prlimit64", prlimit64_syscall),
    (140, "getpriority", getpriority_syscall),
    (141, "setpriority", setpriority_syscall),
    (135, "personality", personality_syscall),
    (95, "umask", umask_syscall),
    (63, "uname", uname_syscall),
    (318, "getrandom", getrandom_syscall),
    (98, "getrusage", getrusage_syscall),
    // time
    (309, "getcpu", getcpu_syscall),
    (228, "clock_gettime", clock_gettime_syscall),
    (229, "clock_getres", clock_getres_syscall),
    (227, "clock_settime", clock_settime_syscall),
    (159, "adjtimex", adjtimex_syscall),
    (305, "clock_adjtime", clock_adjtime_syscall),
    (96, "gettimeofday", gettimeofday_syscall),
    (201, "time", time_syscall),
    (100, "times", times_syscall),
    // root only
    (161, "chroot", eperm_syscall),
    (169, "reboot", eperm_syscall),
    (171, "setdomainname", eperm_syscall),
    (116, "setgroups", eperm_syscall),
    (170, "sethostname", eperm_syscall),
    (112, "setsid", eperm_syscall),
    (164, "settimeofday", eperm_syscall),
    (153, "vhangup", eperm_syscall),
    // no sockets
    (41, "socket", socket_syscall),
    (43, "accept", fd_not_sock_syscall),
    (288, "accept4", fd_not_sock_syscall),
    (52, "getpeername", fd_not_sock_syscall),
    (51, "getsockname", fd_not_sock_syscall),
    (55, "getsockopt", fd_not_sock_syscall),
    (54, "setsockopt", fd_not_sock_syscall),
    (48, "shutdown", fd_not_sock_syscall),
    // no multiprocess, no sleeping
    (56, "clone", enosys_syscall),
    (57, "fork", enosys_syscall),
    (58, "vfork", enosys_syscall),
    (59, "execve", enosys_syscall),
    (322, "execveat", enosys_syscall),
    (61, "wait4", enosys_syscall),
    (247, "waitid", enosys_syscall),
    (35, "nanosleep", enosys_syscall),
    (230, "clock_nanosleep", enosys_syscall),
    (34, "pause", enosys_syscall),
    // no file or socket I/O yet
    (0, "read", enosys_syscall),
    (1, "write", enosys_syscall),
    (2, "open", enosys_syscall),
    (4, "stat", enosys_syscall),
    (5, "fstat", enosys_syscall),
    (8, "lseek", enosys_syscall),
    (7, "poll", enosys_syscall),
    (16, "ioctl", enosys_syscall),
    (72, "fcntl", enosys_syscall),
    (19, "readv", enosys_syscall),
    (20, "writev", enosys_syscall),
    (22, "pipe", enosys_syscall),
    (293, "pipe2", enosys_syscall),
    (276, "tee", enosys_syscall),
    (49, "bind", enosys_syscall),
    (42, "connect", enosys_syscall),
    (50, "listen", enosys_syscall),
    (53, "socketpair", enosys_syscall),
    (44, "sendto", enosys_syscall),
    (45, "recvfrom", enosys_syscall),
    (46, "sendmsg", enosys_syscall),
    (47, "recvmsg", enosys_syscall),
    (307, "sendmmsg", enosys_syscall),
    (299, "recvmmsg", enosys_syscall),
    (14, "rt_sigprocmask", enosys_syscall),
    // everything else that is deferred
    (6, "lstat", enosys_syscall),
    (10, "mprotect", enosys_syscall),
    (13, "rt_sigaction", enosys_syscall),
    (15, "rt_sigreturn", enosys_syscall),
    (17, "pread64", enosys_syscall),
    (18, "pwrite64", enosys_syscall),
    (21, "access", enosys_syscall),
    (23, "select", enosys_syscall),
    (24, "sched_yield", enosys_syscall),
    (26, "msync", enosys_syscall),
    (27, "mincore", enosys_syscall),
    (29, "shmget", enosys_syscall),
    (30, "shmat", enosys_syscall),
    (31, "shmctl", enosys_syscall),
    (36, "getitimer", enosys_syscall),
    (37, "alarm", enosys_syscall),
    (38, "setitimer", enosys_syscall),
    (40, "sendfile", enosys_syscall),
    (64, "semget", enosys_syscall),
    (65, "semop", enosys_syscall),
    (66, "semctl", enosys_syscall),
    (67, "shmdt", enosys_syscall),
    (68, "msgget", enosys_syscall),
    (69, "msgsnd", enosys_syscall),
    (70, "msgrcv", enosys_syscall),
    (71, "msgctl", enosys_syscall),
    (73, "flock", enosys_syscall),
    (74, "fsync", enosys_syscall),
    (75, "fdatasync", enosys_syscall),
    (76, "truncate", enosys_syscall),
    (77, "ftruncate", enosys_syscall),
    (78, "getdents", enosys_syscall),
    (79, "getcwd", enosys_syscall),
    (80, "chdir", enosys_syscall),
    (81, "fchdir", enosys_syscall),
    (82, "rename", enosys_syscall),
    (83, "mkdir", enosys_syscall),
    (84, "rmdir", enosys_syscall),
    (85, "creat", enosys_syscall),
    (86, "link", enosys_syscall),
    (87, "unlink", enosys_syscall),
    (88, "symlink", enosys_syscall),
    (89, "readlink", enosys_syscall),
    (90, "chmod", enosys_syscall),
    (91, "fchmod", enosys_syscall),
    (92, "chown", enosys_syscall),
    (93, "fchown", enosys_syscall),
    (94, "lchown", enosys_syscall),
    (99, "sysinfo", enosys_syscall),
    (101, "ptrace", enosys_syscall),
    (103, "syslog", enosys_syscall),
    (125, "capget", enosys_syscall),
    (126, "capset", enosys_syscall),
    (127, "rt_sigpending", enosys_syscall),
    (128, "rt_sigtimedwait", enosys_syscall),
    (129, "rt_sigqueueinfo", enosys_syscall),
    (130, "rt_sigsuspend", enosys_syscall),
    (131, "sigaltstack", enosys_syscall),
    (132, "utime", enosys_syscall),
    (133, "mknod", enosys_syscall),
    (136, "ustat", enosys_syscall),
    (137, "statfs", enosys_syscall),
    (138, "fstatfs", enosys_syscall),
    (139, "sysfs", enosys_syscall),
    (142, "sched_setparam", enosys_syscall),
    (143, "sched_getparam", enosys_syscall),
    (144, "sched_setscheduler", enosys_syscall),
    (145, "sched_getscheduler", enosys_syscall),
    (146, "sched_get_priority_max", enosys_syscall),
    (147, "sched_get_priority_min", enosys_syscall),
    (148, "sched_rr_get_interval", enosys_syscall),
    (149, "mlock", enosys_syscall),
    (150, "munlock", enosys_syscall),
    (151, "mlockall", enosys_syscall),
    (152, "munlockall", enosys_syscall),
    (154, "modify_ldt", enosys_syscall),
    (155, "pivot_root", enosys_syscall),
    (157, "prctl", enosys_syscall),
    (158, "arch_prctl", enosys_syscall),
    (162, "sync", enosys_syscall),
    (163, "acct", enosys_syscall),
    (165, "mount", enosys_syscall),
    (166, "umount2", enosys_syscall),
    (167, "swapon", enosys_syscall),
    (168, "swapoff", enosys_syscall),
    (175, "init_module", enosys_syscall),
    (176, "delete_module", enosys_syscall),
    (179, "quotactl", enosys_syscall),
    (187, "readahead", enosys_syscall),
    (188, "setxattr", enosys_syscall),
    (189, "lsetxattr", enosys_syscall),
    (190, "fsetxattr", enosys_syscall),
    (191, "getxattr", enosys_syscall),
    (192, "lgetxattr", enosys_syscall),
    (193, "fgetxattr", enosys_syscall),
    (194, "listxattr", enosys_syscall),
    (195, "llistxattr", enosys_syscall),
    (196, "flistxattr", enosys_syscall),
    (197, "removexattr", enosys_syscall),
    (198, "lremovexattr", enosys_syscall),
    (199, "fremovexattr", enosys_syscall),
    (203, "sched_setaffinity", enosys_syscall),
    (204, "sched_getaffinity", enosys_syscall),
    (206, "io_setup", enosys_syscall),
    (207, "io_destroy", enosys_syscall),
    (208, "io_getevents", enosys_syscall),
    (209, "io_submit", enosys_syscall),
    (210, "io_cancel", enosys_syscall),
    (212, "lookup_dcookie", enosys_syscall),
    (213, "epoll_create", enosys_syscall),
    (216, "remap_file_pages", enosys_syscall),
    (217, "getdents64", enosys_syscall),
    (219, "restart_syscall", enosys_syscall),
    (220, "semtimedop", enosys_syscall),
    (221, "fadvise64", enosys_syscall),
    (222, "timer_create", enosys_syscall),
    (223, "timer_settime", enosys_syscall),
    (224, "timer_gettime", enosys_syscall),
    (225, "timer_getoverrun", enosys_syscall),
    (226, "timer_delete", enosys_syscall),
    (232, "epoll_wait", enosys_syscall),
    (233, "epoll_ctl", enosys_syscall),
    (235, "utimes", enosys_syscall),
    (237, "mbind", enosys_syscall),
    (238, "set_mempolicy", enosys_syscall),
    (239, "get_mempolicy", enosys_syscall),
    (240, "mq_open", enosys_syscall),
    (241, "mq_unlink", enosys_syscall),
    (242, "mq_timedsend", enosys_syscall),
    (243, "mq_timedreceive", enosys_syscall),
    (244, "mq_notify", enosys_syscall),
    (245, "mq_getsetattr", enosys_syscall),
    (246, "kexec_load", enosys_syscall),
    (248, "add_key", enosys_syscall),
    (249, "request_key", enosys_syscall),
    (250, "keyctl", enosys_syscall),
    (251, "ioprio_set", enosys_syscall),
    (252, "ioprio_get", enosys_syscall),
    (253, "inotify_init", enosys_syscall),
    (254, "inotify_add_watch", enosys_syscall),
    (255, "inotify_rm_watch", enosys_syscall),
    (256, "migrate_pages", enosys_syscall),
    (257, "openat", enosys_syscall),
    (258, "mkdirat", enosys_syscall),
    (259, "mknodat", enosys_syscall),
    (260, "fchownat", enosys_syscall),
    (261, "futimesat", enosys_syscall),
    (262, "newfstatat", enosys_syscall),
    (263, "unlinkat", enosys_syscall),
    (264, "renameat", enosys_syscall),
    (265, "linkat", enosys_syscall),
    (266, "symlinkat", enosys_syscall),
    (267, "readlinkat", enosys_syscall),
    (268, "fchmodat", enosys_syscall),
    (269, "faccessat", enosys_syscall),
    (270, "pselect6", enosys_syscall),
    (271, "ppoll", enosys_syscall),
    (272, "unshare", enosys_syscall),
    (273, "set_robust_list", enosys_syscall),
    (274, "get_robust_list", enosys_syscall),
    (275, "splice", enosys_syscall),
    (277, "sync_file_range", enosys_syscall),
    (278, "vmsplice", enosys_syscall),
    (279, "move_pages", enosys_syscall),
    (280, "utimensat", enosys_syscall),
    (281, "epoll_pwait", enosys_syscall),
    (282, "signalfd", enosys_syscall),
    (283, "timerfd_create", enosys_syscall),
    (284, "eventfd", enosys_syscall),
    (285, "fallocate", enosys_syscall),
    (286, "timerfd_settime", enosys_syscall),
    (287, "timerfd_gettime", enosys_syscall),
    (289, "signalfd4", enosys_syscall),
    (290, "eventfd2", enosys_syscall),
    (291, "epoll_create1", enosys_syscall),
    (294, "inotify_init1", enosys_syscall),
    (295, "preadv", enosys_syscall),
    (296, "pwritev", enosys_syscall),
    (297, "rt_tgsigqueueinfo", enosys_syscall),
    (298, "perf_event_open", enosys_syscall),
    (300, "fanotify_init", enosys_syscall),
    (301, "fanotify_mark", enosys_syscall),
    (303, "name_to_handle_at", enosys_syscall),
    (304, "open_by_handle_at", enosys_syscall),
    (306, "syncfs", enosys_syscall),
    (308, "setns", enosys_syscall),
    (310, "process_vm_readv", enosys_syscall),
    (311, "process_vm_writev", enosys_syscall),
    (312, "kcmp", enosys_syscall),
    (313, "finit_module", enosys_syscall),
    (314, "sched_setattr", enosys_syscall),
    (315, "sched_getattr", enosys_syscall),
    (316, "renameat2", enosys_syscall),
    (317, "seccomp", enosys_syscall),
    (319, "memfd_create", enosys_syscall),
    (320, "kexec_file_load", enosys_syscall),
    (321, "bpf", enosys_syscall),
    (323, "userfaultfd", enosys_syscall),
    (324, "membarrier", enosys_syscall),
    (325, "mlock2", enosys_syscall),
    (326, "copy_file_range", enosys_syscall),
    (327, "preadv2", enosys_syscall),
    (328, "pwritev2", enosys_syscall),
];

static BY_NUMBER: Lazy<HashMap<u32, (&'static str, RawCallFunc)>> = Lazy::new(|| {
    SYSCALL_TABLE
        .iter()
        .map(|&(num, name, func)| (num, (name, func)))
        .collect()
});

static BY_NAME: Lazy<HashMap<&'static str, (u32, RawCallFunc)>> = Lazy::new(|| {
    SYSCALL_TABLE
        .iter()
        .map(|&(num, name, func)| (name, (num, func)))
        .collect()
});

/// Look up a handler by syscall number.
pub fn lookup_by_number(callnum: u32) -> Option<(&'static str, RawCallFunc)> {
    BY_NUMBER.get(&callnum).copied()
}

/// Look up a handler by bare name (`dup3`) or import name
/// (`__syscall_dup3`).  Returns the canonical name with the handler.
pub fn lookup_by_name(name: &str) -> Option<(&'static str, RawCallFunc)> {
    let bare = name.strip_prefix(SYSCALL_IMPORT_PREFIX).unwrap_or(name);
    BY_NAME
        .get_key_value(bare)
        .map(|(canonical, &(_, func))| (*canonical, func))
}
