//! Decode / register-read stage: reads operands (from the register file or
//! same-cycle forwarding), and claims busy bits for this instruction's
//! destination registers.

use crate::core::arch::Gpr;
use crate::core::pipeline::Latch;
use crate::isa::{destination_registers, reads_rs1, reads_rs2, Instruction};

/// Decodes `if_id` into the latch that execute will consume next cycle.
/// Returns a bubble unchanged if `if_id` is empty.
pub fn decode_stage(if_id: &Latch, gpr: &mut Gpr, trace: bool) -> Latch {
    if !if_id.has_insn {
        return Latch::bubble();
    }

    let mut out = *if_id;

    if reads_rs1(if_id.opcode) {
        out.rs1_value = read_operand(gpr, if_id.rs1);
    }
    if reads_rs2(if_id.opcode) {
        out.rs2_value = read_operand(gpr, if_id.rs2);
    }

    let instr = Instruction {
        opcode: if_id.opcode,
        rd: if_id.rd,
        rs1: if_id.rs1,
        rs2: if_id.rs2,
        imm: if_id.imm,
    };
    for dest in destination_registers(&instr) {
        if let Some(reg) = dest {
            gpr.mark_busy(reg, if_id.pc);
        }
    }

    if trace {
        eprintln!(
            "[Decode]    PC={} {} rs1_val={} rs2_val={}",
            out.pc,
            out.opcode.mnemonic(),
            out.rs1_value,
            out.rs2_value
        );
    }

    out
}

fn read_operand(gpr: &Gpr, reg: usize) -> i32 {
    if gpr.is_valid(reg) {
        gpr.read(reg)
    } else {
        gpr.forwarded(reg)
    }
}
