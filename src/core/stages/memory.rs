//! Memory stage: `LOAD`/`LDI` read data memory into `result_buffer` and
//! forward it; `STORE` writes `rs1_value`, `STI` writes `rs2_value` (the
//! address in both cases was already computed by execute). Every other
//! opcode passes its latch through untouched.

use crate::common::{SimError, DATA_MEMORY_SIZE};
use crate::core::arch::Gpr;
use crate::core::pipeline::Latch;
use crate::isa::Opcode;

/// Indexes `data_memory` directly by effective address, matching the
/// reference implementation's `data_memory[memory_address]`.
fn data_memory_index(addr: i32) -> Result<usize, SimError> {
    if addr < 0 || addr as usize >= DATA_MEMORY_SIZE {
        return Err(SimError::DataMemoryOverrun { addr });
    }
    Ok(addr as usize)
}

pub fn memory_stage(
    ex_mem: &Latch,
    data_memory: &mut [i32],
    gpr: &mut Gpr,
    trace: bool,
) -> Result<Latch, SimError> {
    if !ex_mem.has_insn {
        return Ok(Latch::bubble());
    }

    let mut out = *ex_mem;

    match ex_mem.opcode {
        Opcode::Load | Opcode::Ldi => {
            let index = data_memory_index(ex_mem.memory_address)?;
            out.result_buffer = data_memory[index];
            gpr.forward(ex_mem.rd, out.result_buffer);
            if trace {
                eprintln!(
                    "[Memory]    PC={} LOAD  addr={} value={}",
                    out.pc, ex_mem.memory_address, out.result_buffer
                );
            }
        }
        Opcode::Store => {
            let index = data_memory_index(ex_mem.memory_address)?;
            data_memory[index] = ex_mem.rs1_value;
            if trace {
                eprintln!(
                    "[Memory]    PC={} STORE addr={} value={}",
                    out.pc, ex_mem.memory_address, ex_mem.rs1_value
                );
            }
        }
        Opcode::Sti => {
            let index = data_memory_index(ex_mem.memory_address)?;
            data_memory[index] = ex_mem.rs2_value;
            if trace {
                eprintln!(
                    "[Memory]    PC={} STI   addr={} value={}",
                    out.pc, ex_mem.memory_address, ex_mem.rs2_value
                );
            }
        }
        _ => {}
    }

    Ok(out)
}
