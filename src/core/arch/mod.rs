//! APEX architectural state: the general-purpose register file, its
//! busy-bit hazard tracking, and the same-cycle forwarding buffer.

/// General-purpose register file implementation.
pub mod gpr;

pub use gpr::Gpr;
