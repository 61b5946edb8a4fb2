//! Shared definitions for the rawposix syscall layer: errno values, the
//! constants guest programs see through the syscall ABI, and the byte
//! layouts of the structs that get copied out to guest memory.
pub mod constants;
pub mod data;
