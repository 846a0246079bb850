//! Fetch stage: reads the next instruction out of code memory and advances
//! the program counter.

use crate::common::{code_memory_index, SimError};
use crate::core::pipeline::Latch;
use crate::isa::{Instruction, Opcode};

/// Fetches the instruction at `*pc` into a fresh latch and advances `*pc`
/// by one instruction width. Returns a bubble without touching `pc` if
/// fetching is disabled (either a HALT has already been fetched, or a
/// branch/JUMP flush is redirecting the pipeline this cycle and the
/// caller wants the bubble to occupy `if_id` instead).
///
/// Fetching past the end of code memory without ever having fetched a
/// HALT is a fatal [`SimError::CodeMemoryOverrun`].
pub fn fetch_stage(
    pc: &mut i32,
    code_memory: &[Instruction],
    fetch_enabled: &mut bool,
    trace: bool,
) -> Result<Latch, SimError> {
    if !*fetch_enabled {
        return Ok(Latch::bubble());
    }

    let index = code_memory_index(*pc).ok_or(SimError::CodeMemoryOverrun { pc: *pc })?;
    let instr = code_memory
        .get(index)
        .ok_or(SimError::CodeMemoryOverrun { pc: *pc })?;

    let mut latch = Latch::bubble();
    latch.has_insn = true;
    latch.pc = *pc;
    latch.opcode = instr.opcode;
    latch.rd = instr.rd;
    latch.rs1 = instr.rs1;
    latch.rs2 = instr.rs2;
    latch.imm = instr.imm;

    if instr.opcode == Opcode::Halt {
        *fetch_enabled = false;
    }

    if trace {
        eprintln!("[Fetch]     PC={} {}", latch.pc, latch.opcode.mnemonic());
    }

    *pc += 4;
    Ok(latch)
}
