//! Guest linear memory and the typed accessor syscalls use to reach it
pub mod mem_helper;
pub mod memory;

pub use mem_helper::*;
pub use memory::*;
