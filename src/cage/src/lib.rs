//! Kernel-side state for one guest instance.  A [`Cage`] owns everything a
//! syscall can observe or change: identity, resource limits, descriptors,
//! clock bookkeeping, and a bounds-checked handle on guest memory.
pub mod cage;
pub mod clock;
pub mod config;
pub mod host;
pub mod identity;
pub mod memory;
pub mod rlimit;
pub mod signal;

pub use cage::*;
pub use clock::*;
pub use config::*;
pub use host::*;
pub use identity::*;
pub use memory::*;
pub use rlimit::*;
pub use signal::*;
