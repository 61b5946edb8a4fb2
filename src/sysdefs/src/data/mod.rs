pub mod sys_struct;

pub use sys_struct::*;
