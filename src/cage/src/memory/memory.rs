//! Bounds-checked access to guest linear memory.
//!
//! The host owns the memory and may grow it between syscalls.  Growth
//! replaces the backing buffer, so anything derived from the old buffer
//! (here, the cached length used for bounds checks) has to be rebuilt.  The
//! buffer carries a generation counter for exactly that purpose.
//!
//! Every access validates its whole range and alignment before touching a
//! byte.  A rejected access changes nothing; callers turn it into `EFAULT`.
use super::mem_helper::{check_guest_range, round_up_page};
pub use parking_lot::RwLock;
use std::cell::Cell;
use std::sync::Arc;
use sysdefs::constants::lind_platform_const::{MAX_LINEAR_MEMORY_SIZE, WASM_PAGE_SIZE};

/// The guest's memory as the host sees it.
#[derive(Debug, Default)]
pub struct LinearMemory {
    bytes: Vec<u8>,
    generation: u64,
}

/// Memory is shared between the host, which grows it, and the cage.
pub type SharedMemory = Arc<RwLock<LinearMemory>>;

impl LinearMemory {
    /// Zeroed memory of at least `len` bytes, rounded up to whole pages.
    pub fn new(len: usize) -> Self {
        LinearMemory {
            bytes: vec![0; round_up_page(len)],
            generation: 0,
        }
    }

    /// Convenience for wrapping a fresh memory for sharing.
    pub fn shared(len: usize) -> SharedMemory {
        Arc::new(RwLock::new(Self::new(len)))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bumped every time the backing buffer is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Grow by `delta_pages` pages.  The old contents move to a new buffer.
    /// Returns the previous size in pages, or `None` if the result would not
    /// be addressable with a 32-bit pointer.
    pub fn grow(&mut self, delta_pages: usize) -> Option<usize> {
        let oldpages = self.bytes.len() / WASM_PAGE_SIZE;
        let newlen = (oldpages + delta_pages).checked_mul(WASM_PAGE_SIZE)?;
        if newlen as u64 > MAX_LINEAR_MEMORY_SIZE + 1 {
            return None;
        }
        let mut newbytes = vec![0; newlen];
        newbytes[..self.bytes.len()].copy_from_slice(&self.bytes);
        self.bytes = newbytes;
        self.generation += 1;
        Some(oldpages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MemoryView {
    generation: u64,
    len: usize,
}

/// Typed, bounds-checked reads and writes of guest memory.  32-bit values
/// must be 4-byte aligned and 64-bit values 8-byte aligned; all values are
/// little-endian.
#[derive(Debug)]
pub struct MemoryAccessor {
    memory: SharedMemory,
    view: Cell<MemoryView>,
}

impl MemoryAccessor {
    pub fn new(memory: SharedMemory) -> Self {
        let view = {
            let mem = memory.read();
            MemoryView {
                generation: mem.generation(),
                len: mem.len(),
            }
        };
        MemoryAccessor {
            memory,
            view: Cell::new(view),
        }
    }

    /// The memory this accessor reads and writes.
    pub fn shared(&self) -> &SharedMemory {
        &self.memory
    }

    // Re-derive the cached view if the buffer has been replaced since we
    // last looked.
    fn current_view(&self, mem: &LinearMemory) -> MemoryView {
        let cached = self.view.get();
        if cached.generation == mem.generation() {
            return cached;
        }
        let fresh = MemoryView {
            generation: mem.generation(),
            len: mem.len(),
        };
        log::debug!(
            "memory: buffer replaced (gen {} -> {}), view now {} bytes",
            cached.generation,
            fresh.generation,
            fresh.len
        );
        self.view.set(fresh);
        fresh
    }

    /// Whether `[addr, addr + len)` is in bounds and `addr` is a multiple of
    /// `align`.
    pub fn check_range(&self, addr: u32, len: u32, align: u32) -> bool {
        let mem = self.memory.read();
        let view = self.current_view(&mem);
        check_guest_range(addr, len, align, view.len).is_some()
    }

    /// Current size of guest memory in bytes.
    pub fn usage(&self) -> usize {
        let mem = self.memory.read();
        self.current_view(&mem).len
    }

    fn read_array<const N: usize>(&self, addr: u32, align: u32) -> Option<[u8; N]> {
        let mem = self.memory.read();
        let view = self.current_view(&mem);
        let start = check_guest_range(addr, N as u32, align, view.len)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&mem.bytes()[start..start + N]);
        Some(out)
    }

    fn write_with(&self, addr: u32, len: u32, align: u32, f: impl FnOnce(&mut [u8])) -> bool {
        let mut mem = self.memory.write();
        let view = self.current_view(&mem);
        match check_guest_range(addr, len, align, view.len) {
            Some(start) => {
                f(&mut mem.bytes_mut()[start..start + len as usize]);
                true
            }
            None => false,
        }
    }

    pub fn read_u32(&self, addr: u32) -> Option<u32> {
        self.read_array::<4>(addr, 4).map(u32::from_le_bytes)
    }

    pub fn read_i32(&self, addr: u32) -> Option<i32> {
        self.read_array::<4>(addr, 4).map(i32::from_le_bytes)
    }

    pub fn read_u64(&self, addr: u32) -> Option<u64> {
        self.read_array::<8>(addr, 8).map(u64::from_le_bytes)
    }

    pub fn write_u32(&self, addr: u32, value: u32) -> bool {
        self.write_with(addr, 4, 4, |dst| dst.copy_from_slice(&value.to_le_bytes()))
    }

    pub fn write_i32(&self, addr: u32, value: i32) -> bool {
        self.write_with(addr, 4, 4, |dst| dst.copy_from_slice(&value.to_le_bytes()))
    }

    pub fn write_u64(&self, addr: u32, value: u64) -> bool {
        self.write_with(addr, 8, 8, |dst| dst.copy_from_slice(&value.to_le_bytes()))
    }

    pub fn write_i64(&self, addr: u32, value: i64) -> bool {
        self.write_with(addr, 8, 8, |dst| dst.copy_from_slice(&value.to_le_bytes()))
    }

    /// Copy raw bytes in.  No alignment requirement.
    pub fn write_bytes(&self, addr: u32, data: &[u8]) -> bool {
        let Ok(len) = u32::try_from(data.len()) else {
            return false;
        };
        self.write_with(addr, len, 1, |dst| dst.copy_from_slice(data))
    }

    /// Write `s` into a fixed `width`-byte field: truncated to `width - 1`
    /// bytes, then NUL-padded to the full width.
    pub fn write_string(&self, addr: u32, s: &str, width: u32) -> bool {
        if width == 0 {
            return self.check_range(addr, 0, 1);
        }
        let src = s.as_bytes();
        let n = src.len().min(width as usize - 1);
        self.write_with(addr, width, 1, |dst| {
            dst[..n].copy_from_slice(&src[..n]);
            dst[n..].fill(0);
        })
    }

    /// Zero `len` bytes.
    pub fn write_zeroes(&self, addr: u32, len: u32) -> bool {
        self.write_with(addr, len, 1, |dst| dst.fill(0))
    }
}
