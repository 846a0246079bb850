//! The five APEX pipeline stages, each a plain function over latches and
//! architectural state rather than a method on `Cpu` — matching the
//! teacher's free-function stage shape.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod write_back;
