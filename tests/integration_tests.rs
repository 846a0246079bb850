//! End-to-end scenarios: each test assembles a short program, runs it to
//! completion through `Cpu::init`/`Cpu::run`, and checks the architectural
//! state the run should leave behind.

use apex_sim::config::{Mode, RunConfig};
use apex_sim::core::Cpu;
use std::fs;
use std::io::Write as _;

/// Writes `contents` to a fresh temp file and returns its path.
fn program_file(contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "apex_integration_test_{}_{:p}.asm",
        std::process::id(),
        contents.as_ptr()
    ));
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn run(contents: &str, cycles: i32) -> Cpu {
    let path = program_file(contents);
    let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, cycles)).unwrap();
    cpu.run().unwrap();
    fs::remove_file(&path).ok();
    cpu
}

#[test]
fn straight_line_arithmetic_commits_all_three_registers() {
    let cpu = run("MOVC,R1,#5\nMOVC,R2,#7\nADD,R3,R1,R2\nHALT\n", 30);
    assert_eq!(cpu.gpr.read(1), 5);
    assert_eq!(cpu.gpr.read(2), 7);
    assert_eq!(cpu.gpr.read(3), 12);
    assert!(!cpu.zero_flag);
    assert_eq!(cpu.stats.instructions_retired, 4);
}

#[test]
fn load_use_hazard_stalls_the_dependent_add_by_one_cycle() {
    let cpu = run(
        "MOVC,R1,#100\nMOVC,R4,#5\nSTORE,R4,R1,#0\nLOAD,R2,R1,#0\nADD,R3,R2,R1\nHALT\n",
        40,
    );
    assert_eq!(cpu.gpr.read(2), 5, "LOAD should read back what STORE wrote");
    assert_eq!(cpu.gpr.read(3), 105, "ADD consumes the loaded value once it stalls past it");
    assert_eq!(cpu.stats.stalls_data, 1);
}

#[test]
fn taken_branch_squashes_the_instruction_behind_it() {
    let cpu = run(
        "MOVC,R1,#0\nMOVC,R2,#0\nADD,R3,R1,R2\nBZ,#8\nMOVC,R4,#99\nMOVC,R5,#77\nHALT\n",
        40,
    );
    assert_eq!(cpu.gpr.read(4), 0, "MOVC R4 was fetched behind the taken branch and must be squashed");
    assert_eq!(cpu.gpr.read(5), 77, "execution resumes at the branch target");
    assert!(cpu.stats.stalls_control >= 1);
}

#[test]
fn second_add_reads_forwarded_r3_without_stalling() {
    let cpu = run("MOVC,R1,#3\nMOVC,R2,#4\nADD,R3,R1,R2\nADD,R4,R3,R1\nHALT\n", 30);
    assert_eq!(cpu.gpr.read(3), 7);
    assert_eq!(cpu.gpr.read(4), 10, "R4 = R3 + R1 = 7 + 3, forwarded with no stall");
    assert_eq!(cpu.stats.stalls_data, 0);
}

#[test]
fn ldi_commits_the_loaded_value_and_post_increments_its_base() {
    let path = program_file("MOVC,R1,#40\nLDI,R2,R1,#0\nHALT\n");
    let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, 30)).unwrap();
    cpu.data_memory[40] = 42;
    cpu.run().unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(cpu.gpr.read(2), 42);
    assert_eq!(cpu.gpr.read(1), 44, "LDI post-increments rs1 by 4, independent of imm");
    assert!(cpu.gpr.is_valid(1));
    assert!(cpu.gpr.is_valid(2));
}

#[test]
fn sti_stores_rs2_and_post_increments_rs1() {
    let path = program_file("MOVC,R1,#40\nMOVC,R2,#99\nSTI,R1,R2,#0\nHALT\n");
    let mut cpu = Cpu::init(path.to_str().unwrap(), RunConfig::new(Mode::Simulate, 30)).unwrap();
    cpu.run().unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(cpu.data_memory[40], 99, "STI writes rs2's value, not rs1's");
    assert_eq!(cpu.gpr.read(1), 44, "STI post-increments rs1 like LDI, not rs2");
}

#[test]
fn jump_redirects_past_the_fetched_successor() {
    let cpu = run(
        "MOVC,R1,#4016\nJUMP,R1,#0\nMOVC,R2,#99\nHALT\nMOVC,R3,#7\nHALT\n",
        40,
    );
    assert_eq!(cpu.gpr.read(2), 0, "MOVC R2 sat in the fetch slot behind JUMP and is squashed");
    assert_eq!(cpu.gpr.read(3), 7);
}

#[test]
fn halt_only_program_retires_exactly_one_instruction() {
    let cpu = run("HALT\n", 10);
    assert!(cpu.halted);
    assert_eq!(cpu.stats.instructions_retired, 1);
}

#[test]
fn cycle_bound_stops_a_non_halting_program() {
    let cpu = run("NOP\nNOP\nNOP\nNOP\nNOP\n", 3);
    assert!(!cpu.halted);
    assert_eq!(cpu.clock, 3);
}
