//! Conversions between the raw integers a guest passes to a syscall and the
//! typed values the syscall implementations work with, in both directions.
pub mod datatype_conversion;
pub mod struct_conversion;
pub mod syscall_conv;

pub use datatype_conversion::*;
pub use struct_conversion::*;
pub use syscall_conv::*;
