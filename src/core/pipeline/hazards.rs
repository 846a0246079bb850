//! Load-use hazard detection.
//!
//! Every other data dependency resolves through same-cycle forwarding (see
//! [`crate::core::arch::Gpr::forward`]) because stages run in reverse
//! pipeline order within a tick: by the time decode runs, execute (and
//! memory) have already produced this cycle's results. A load's value is
//! the one exception — it isn't known until memory, one stage later than
//! forwarding can reach — so a consumer in decode must stall exactly one
//! cycle.

use crate::core::pipeline::latches::Latch;
use crate::isa::{is_load_class, reads_rs1, reads_rs2};

/// True if the instruction about to leave decode this cycle (`id_ex`, a
/// load) produces a register that the instruction currently in decode
/// (`if_id`) needs to read.
pub fn need_stall_load_use(id_ex: &Latch, if_id: &Latch) -> bool {
    if !id_ex.has_insn || !is_load_class(id_ex.opcode) {
        return false;
    }
    if !if_id.has_insn {
        return false;
    }

    let uses_rs1 = reads_rs1(if_id.opcode) && if_id.rs1 == id_ex.rd;
    let uses_rs2 = reads_rs2(if_id.opcode) && if_id.rs2 == id_ex.rd;
    uses_rs1 || uses_rs2
}
