//! The APEX CPU: architectural state and the per-cycle `tick()` driver
//! that wires the five stage functions together.

use crate::common::{SimError, CODE_START_ADDRESS, DATA_MEMORY_SIZE};
use crate::config::{Mode, RunConfig};
use crate::core::arch::Gpr;
use crate::core::pipeline::{describe, need_stall_load_use, Latch};
use crate::core::stages;
use crate::isa::Instruction;
use crate::stats::SimStats;
use std::io::{self, Write};

pub struct Cpu {
    pub pc: i32,
    pub clock: i32,
    pub halted: bool,
    fetch_enabled: bool,

    pub code_memory: Vec<Instruction>,
    pub data_memory: Vec<i32>,
    pub gpr: Gpr,
    pub zero_flag: bool,
    pub pos_flag: bool,

    pub if_id: Latch,
    pub id_ex: Latch,
    pub ex_mem: Latch,
    pub mem_wb: Latch,
    pub wb_latch: Latch,

    pub stats: SimStats,
    pub config: RunConfig,
}

impl Cpu {
    /// Loads `path` and builds a freshly-reset CPU ready to run under
    /// `config`.
    pub fn init(path: &str, config: RunConfig) -> Result<Self, SimError> {
        let code_memory = crate::sim::load_program(path)?;
        Ok(Self {
            pc: CODE_START_ADDRESS,
            clock: 0,
            halted: false,
            fetch_enabled: true,
            code_memory,
            data_memory: vec![0; DATA_MEMORY_SIZE],
            gpr: Gpr::new(),
            zero_flag: false,
            pos_flag: false,
            if_id: Latch::bubble(),
            id_ex: Latch::bubble(),
            ex_mem: Latch::bubble(),
            mem_wb: Latch::bubble(),
            wb_latch: Latch::bubble(),
            stats: SimStats::new(),
            config,
        })
    }

    /// Advances the pipeline by one cycle. Stage order mirrors dependency
    /// order in reverse (writeback first, fetch last) so a result produced
    /// by a later stage this cycle is already visible to an earlier stage
    /// still executing this same cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.clock += 1;
        let trace = self.config.trace;

        let halted_this_cycle =
            stages::write_back::write_back_stage(&self.mem_wb, &mut self.gpr, &mut self.stats, trace);
        if halted_this_cycle {
            self.halted = true;
            return Ok(());
        }

        self.wb_latch = self.mem_wb;
        self.mem_wb =
            stages::memory::memory_stage(&self.ex_mem, &mut self.data_memory, &mut self.gpr, trace)?;

        let (ex_mem, flush_target) = stages::execute::execute_stage(
            &self.id_ex,
            &mut self.gpr,
            &mut self.zero_flag,
            &mut self.pos_flag,
            trace,
        );
        self.ex_mem = ex_mem;

        if let Some(target) = flush_target {
            // This cycle is the branch-redirect bubble: `pc` is redirected
            // now but fetch does not run this cycle at all. `if_id` stays a
            // bubble; the instruction at `target` is fetched on the
            // following tick's normal fetch call.
            self.id_ex = Latch::bubble();
            self.if_id = Latch::bubble();
            self.pc = target;
            self.stats.stalls_control += 1;
            return Ok(());
        }

        if need_stall_load_use(&self.id_ex, &self.if_id) {
            self.id_ex = Latch::bubble();
            self.stats.stalls_data += 1;
        } else {
            self.id_ex = stages::decode::decode_stage(&self.if_id, &mut self.gpr, trace);
            self.if_id =
                stages::fetch::fetch_stage(&mut self.pc, &self.code_memory, &mut self.fetch_enabled, trace)?;
        }

        Ok(())
    }

    /// Runs to completion (HALT retiring, or the configured cycle bound,
    /// whichever comes first), honoring the configured mode's interactivity.
    /// Returns `(cycles_run, instructions_retired)`.
    pub fn run(&mut self) -> Result<(i32, i32), SimError> {
        loop {
            if self.halted {
                break;
            }
            // `ShowMem` reuses `cycles` as a data memory index to print
            // after the run, so it always runs to completion instead of
            // stopping at a cycle bound.
            if self.config.mode != Mode::ShowMem && self.clock >= self.config.cycles {
                break;
            }

            self.tick()?;

            if self.config.mode == Mode::SingleStep {
                self.print_pipeline_diagram();
                self.prompt_continue();
            } else if self.config.mode == Mode::Display {
                self.print_pipeline_diagram();
            }
        }

        Ok((self.clock, self.stats.instructions_retired as i32))
    }

    fn prompt_continue(&self) {
        print!("Press Enter to continue...");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        let _ = io::stdin().read_line(&mut buf);
    }

    pub fn print_pipeline_diagram(&self) {
        eprintln!(
            "IF:{} ID:{} EX:{} MEM:{} WB:{}",
            describe(&self.if_id),
            describe(&self.id_ex),
            describe(&self.ex_mem),
            describe(&self.mem_wb),
            describe(&self.wb_latch),
        );
    }

    pub fn dump_registers(&self) {
        println!("PC = {}", self.pc);
        println!("zero_flag = {}  pos_flag = {}", self.zero_flag, self.pos_flag);
        self.gpr.dump();
    }

    pub fn data_memory_at(&self, index: usize) -> Option<i32> {
        self.data_memory.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write as _;

    fn program_file(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("apex_cpu_test_{}.asm", contents.as_ptr() as usize));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn a_program_that_only_halts_retires_one_instruction() {
        let path = program_file("HALT\n");
        let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, 20)).unwrap();
        cpu.run().unwrap();
        assert!(cpu.halted);
        assert_eq!(cpu.stats.instructions_retired, 1);
    }

    #[test]
    fn movc_then_halt_commits_the_immediate() {
        let path = program_file("MOVC,R0,#42\nHALT\n");
        let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, 20)).unwrap();
        cpu.run().unwrap();
        assert_eq!(cpu.gpr.read(0), 42);
    }

    #[test]
    fn load_use_hazard_stalls_exactly_one_cycle() {
        let path = program_file("MOVC,R0,#400\nLOAD,R1,R0,#0\nADD,R2,R1,R1\nHALT\n");
        let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, 30)).unwrap();
        cpu.run().unwrap();
        assert_eq!(cpu.stats.stalls_data, 1);
    }

    #[test]
    fn taken_branch_flushes_and_redirects_pc() {
        let path = program_file("MOVC,R0,#0\nBZ,#12\nMOVC,R1,#99\nHALT\nMOVC,R1,#1\nHALT\n");
        let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, 30)).unwrap();
        cpu.run().unwrap();
        assert_eq!(cpu.gpr.read(1), 1);
        assert!(cpu.stats.stalls_control >= 1);
    }
}
