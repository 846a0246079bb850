//! APEX pipeline simulator CLI.
//!
//! Drives a [`Cpu`] to completion (or the requested cycle bound) and
//! prints whatever the selected mode asks for: nothing beyond the final
//! statistics banner in `simulate` mode, a per-cycle pipeline trace in
//! `display`/`single_step`, or a single data memory word in `show_mem`.

use clap::Parser;
use std::process;

use apex_sim::config::{Mode, RunConfig};
use apex_sim::core::Cpu;

/// `apex <input_file> <mode> <count>`
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-accurate simulator for the APEX five-stage pipeline")]
struct Args {
    /// Path to an assembly-text program.
    input_file: String,

    /// Execution mode.
    #[arg(value_enum)]
    mode: Mode,

    /// Cycle bound for simulate/display/single_step; the data memory word
    /// index to print for show_mem.
    count: i32,
}

fn main() {
    let args = Args::parse();
    let config = RunConfig::new(args.mode, args.count);

    let mut cpu = match Cpu::init(&args.input_file, config) {
        Ok(cpu) => cpu,
        Err(e) => {
            eprintln!("apex: {}", e);
            process::exit(1);
        }
    };

    match cpu.run() {
        Ok((cycles, _retired)) => {
            cpu.stats.print(cycles);
            if args.mode == Mode::ShowMem {
                let index = args.count as usize;
                match cpu.data_memory_at(index) {
                    Some(value) => println!("data_memory[{}] = {}", args.count, value),
                    None => {
                        eprintln!("apex: data memory index {} out of range", args.count);
                        process::exit(1);
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("apex: {}", e);
            cpu.dump_registers();
            cpu.stats.print(cpu.clock);
            process::exit(1);
        }
    }
}
