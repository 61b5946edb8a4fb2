//! This file defines constants that are specific to running a guest on a
//! WebAssembly linear memory.

/// Placeholder for unused syscall argument
pub const UNUSED_ARG: u64 = 0xDEADBEEF_DEADBEEF;

/// Size of a single linear memory page.  Memory only ever grows by whole
/// pages.
pub const WASM_PAGE_SIZE: usize = 65536;

/// Guest pointers are 32-bit offsets into linear memory, so this is the
/// largest memory a guest can address.
pub const MAX_LINEAR_MEMORY_SIZE: u64 = 0xFFFF_FFFF;

/// The guest's NULL pointer.
pub const GUEST_NULL: u32 = 0;
