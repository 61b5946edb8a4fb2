//! Layouts of the kernel structs that syscalls copy into guest memory.
//!
//! Only the sizes and field offsets matter here: the guest is a 32-bit
//! module whose `long` is 4 bytes while `time_t` is 8, so none of these
//! can be expressed as a host `#[repr(C)]` struct.

/// A resource limit as held by the kernel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rlimit {
    pub rlim_cur: u64,
    pub rlim_max: u64,
}

impl Rlimit {
    pub const fn fixed(value: u64) -> Self {
        Rlimit {
            rlim_cur: value,
            rlim_max: value,
        }
    }
}

/// Size of a guest `long`.
pub const SIZEOF_LONG: u32 = 4;

// struct timeval { time_t tv_sec; suseconds_t tv_usec; }, both 64-bit
pub const SIZEOF_TIMEVAL: u32 = 16;
pub const TIMEVAL_USEC_OFFSET: u32 = 8;

// struct timespec { time_t tv_sec; long tv_nsec; } plus 4 bytes of padding
pub const SIZEOF_TIMESPEC: u32 = 16;
pub const TIMESPEC_NSEC_OFFSET: u32 = 8;

// struct timezone { int tz_minuteswest; int tz_dsttime; }
pub const SIZEOF_TIMEZONE: u32 = 8;

// struct tms { clock_t x4 }
pub const SIZEOF_TMS: u32 = 4 * SIZEOF_LONG;

// struct rusage: two timevals then 14 longs and padding, 30 longs total
pub const SIZEOF_RUSAGE: u32 = 2 * SIZEOF_TIMEVAL + 30 * SIZEOF_LONG;
pub const RUSAGE_MAXRSS_OFFSET: u32 = 2 * SIZEOF_TIMEVAL;

// struct timex: 4 ints, 15 longs, one timeval, 11 trailing bytes
pub const SIZEOF_TIMEX: u32 = 4 * 4 + 15 * SIZEOF_LONG + SIZEOF_TIMEVAL + 11;

// struct utsname: six fixed width fields
pub const UTSNAME_FIELD_LEN: u32 = 65;
pub const UTSNAME_FIELDS: u32 = 6;
pub const SIZEOF_UTSNAME: u32 = UTSNAME_FIELD_LEN * UTSNAME_FIELDS;

// struct rlimit (32-bit fields) and struct rlimit64
pub const SIZEOF_RLIMIT: u32 = 8;
pub const SIZEOF_RLIMIT64: u32 = 16;
