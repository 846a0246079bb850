//! CPU core: architectural state, pipeline latches, per-stage logic, and
//! the cycle driver that wires them together.

/// Register file and busy-bit hazard state.
pub mod arch;

/// The CPU struct, its tick() driver, and the run/single-step loops.
pub mod cpu;

/// Inter-stage latches and hazard detection.
pub mod pipeline;

/// The five stage functions: fetch, decode, execute, memory, writeback.
pub mod stages;

pub use cpu::Cpu;
