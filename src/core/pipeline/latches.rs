//! The single inter-stage latch type shared by all five pipeline stages,
//! mirroring the original CPU's reused stage structure rather than a
//! distinct struct per boundary.

use crate::isa::Opcode;

/// State carried from one pipeline stage to the next for a single
/// in-flight instruction (or no instruction at all, if `has_insn` is
/// false — a bubble).
#[derive(Clone, Copy, Debug)]
pub struct Latch {
    pub pc: i32,
    pub opcode: Opcode,
    pub rs1: usize,
    pub rs2: usize,
    pub rd: usize,
    pub imm: i32,
    pub rs1_value: i32,
    pub rs2_value: i32,
    pub result_buffer: i32,
    /// The post-increment value `LDI`/`STI` commit to `rs1` at writeback
    /// (`rs1_value + 4`). Distinct from `memory_address` (`rs1_value + imm`,
    /// the address those same opcodes read or write).
    pub resetting_buffer: i32,
    pub memory_address: i32,
    pub has_insn: bool,
}

impl Latch {
    /// An empty latch: no instruction occupies this pipeline slot.
    pub fn bubble() -> Self {
        Self::default()
    }
}

impl Default for Latch {
    fn default() -> Self {
        Self {
            pc: 0,
            opcode: Opcode::Nop,
            rs1: 0,
            rs2: 0,
            rd: 0,
            imm: 0,
            rs1_value: 0,
            rs2_value: 0,
            result_buffer: 0,
            resetting_buffer: 0,
            memory_address: 0,
            has_insn: false,
        }
    }
}

/// A short, single-line description of a latch's occupant, used by the
/// per-cycle pipeline diagram.
pub fn describe(latch: &Latch) -> String {
    if !latch.has_insn {
        "empty".to_string()
    } else {
        format!("pc={} {}", latch.pc, latch.opcode.mnemonic())
    }
}
