//! Execute stage: ALU arithmetic, flag updates, memory address computation,
//! and branch/jump target resolution.
//!
//! For opcodes whose destination value is already known at this point
//! (every ALU op, `MOVC`, and the post-increment register shared by `LDI`
//! and `STI`) the result is forwarded immediately so a younger instruction
//! in decode this same cycle sees it without stalling.
//!
//! `LOAD`/`LDI` address off `rs1`; `STORE` addresses off `rs2` but `STI`
//! addresses off `rs1` like `LDI` (`STI` writes `rs2`'s value to that
//! address and post-increments `rs1`, mirroring `LDI`'s load-and-increment
//! shape rather than `STORE`'s).

use crate::core::arch::Gpr;
use crate::core::pipeline::Latch;
use crate::isa::Opcode;

/// Executes `id_ex`, returning the latch to hand to memory and, if a
/// branch or `JUMP` is taken, the PC the pipeline must flush to.
pub fn execute_stage(
    id_ex: &Latch,
    gpr: &mut Gpr,
    zero_flag: &mut bool,
    pos_flag: &mut bool,
    trace: bool,
) -> (Latch, Option<i32>) {
    if !id_ex.has_insn {
        return (Latch::bubble(), None);
    }

    let mut out = *id_ex;
    let mut flush_target = None;

    match id_ex.opcode {
        Opcode::Add => {
            out.result_buffer = id_ex.rs1_value.wrapping_add(id_ex.rs2_value);
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Sub => {
            out.result_buffer = id_ex.rs1_value.wrapping_sub(id_ex.rs2_value);
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Mul => {
            out.result_buffer = id_ex.rs1_value.wrapping_mul(id_ex.rs2_value);
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Div => {
            out.result_buffer = if id_ex.rs2_value == 0 {
                0
            } else {
                id_ex.rs1_value.wrapping_div(id_ex.rs2_value)
            };
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Addl => {
            out.result_buffer = id_ex.rs1_value.wrapping_add(id_ex.imm);
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Subl => {
            out.result_buffer = id_ex.rs1_value.wrapping_sub(id_ex.imm);
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::And => {
            out.result_buffer = id_ex.rs1_value & id_ex.rs2_value;
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Or => {
            out.result_buffer = id_ex.rs1_value | id_ex.rs2_value;
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Exor => {
            out.result_buffer = id_ex.rs1_value ^ id_ex.rs2_value;
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Movc => {
            out.result_buffer = id_ex.imm;
            *zero_flag = out.result_buffer == 0;
            gpr.forward(id_ex.rd, out.result_buffer);
        }
        Opcode::Cmp => {
            *zero_flag = id_ex.rs1_value == id_ex.rs2_value;
            *pos_flag = id_ex.rs1_value > id_ex.rs2_value;
        }
        Opcode::Load => {
            out.memory_address = id_ex.rs1_value.wrapping_add(id_ex.imm);
        }
        Opcode::Ldi => {
            out.memory_address = id_ex.rs1_value.wrapping_add(id_ex.imm);
            out.resetting_buffer = id_ex.rs1_value.wrapping_add(4);
            gpr.forward(id_ex.rs1, out.resetting_buffer);
        }
        Opcode::Store => {
            out.memory_address = id_ex.rs2_value.wrapping_add(id_ex.imm);
        }
        Opcode::Sti => {
            out.memory_address = id_ex.rs1_value.wrapping_add(id_ex.imm);
            out.resetting_buffer = id_ex.rs1_value.wrapping_add(4);
            gpr.forward(id_ex.rs1, out.resetting_buffer);
        }
        Opcode::Bz => {
            if *zero_flag {
                flush_target = Some(id_ex.pc.wrapping_add(id_ex.imm));
            }
        }
        Opcode::Bnz => {
            if !*zero_flag {
                flush_target = Some(id_ex.pc.wrapping_add(id_ex.imm));
            }
        }
        Opcode::Bp => {
            if *pos_flag {
                flush_target = Some(id_ex.pc.wrapping_add(id_ex.imm));
            }
        }
        Opcode::Bnp => {
            if !*pos_flag {
                flush_target = Some(id_ex.pc.wrapping_add(id_ex.imm));
            }
        }
        Opcode::Jump => {
            flush_target = Some(id_ex.rs1_value.wrapping_add(id_ex.imm));
        }
        Opcode::Nop | Opcode::Halt => {}
    }

    if trace {
        eprintln!(
            "[Execute]   PC={} {} result={} addr={}",
            out.pc, out.opcode.mnemonic(), out.result_buffer, out.memory_address
        );
    }

    (out, flush_target)
}
