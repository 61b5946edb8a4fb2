//! Address arithmetic helpers shared by the memory accessor
use sysdefs::constants::lind_platform_const::WASM_PAGE_SIZE;

/// Round up the length to be a multiple of linear memory pages
///
/// # Arguments
/// * `length` - length in bytes
///
/// # Returns
/// * `usize` - rounded up length
pub fn round_up_page(length: usize) -> usize {
    if length % WASM_PAGE_SIZE == 0 {
        length
    } else {
        ((length / WASM_PAGE_SIZE) + 1) * WASM_PAGE_SIZE
    }
}

/// Whether `addr` is a multiple of `align`.  `align` must be a power of two.
pub fn is_aligned(addr: u32, align: u32) -> bool {
    debug_assert!(align.is_power_of_two());
    addr & (align - 1) == 0
}

/// Check that `[addr, addr + len)` fits in a buffer of `buflen` bytes and
/// that `addr` is aligned.  Returns the start offset on success.
pub fn check_guest_range(addr: u32, len: u32, align: u32, buflen: usize) -> Option<usize> {
    if !is_aligned(addr, align) {
        return None;
    }
    let end = addr as u64 + len as u64;
    if end > buflen as u64 {
        return None;
    }
    Some(addr as usize)
}
