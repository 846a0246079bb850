//! APEX five-stage pipeline simulator core.
//!
//! This crate implements a cycle-accurate simulator for the APEX in-order
//! RISC pipeline: a single-issue CPU with five stages (Fetch, Decode/Register
//! Read, Execute, Memory, Writeback), a 16-entry integer register file with
//! busy-bit hazard tracking, operand forwarding, load-use stalling, and
//! branch/jump flush logic.
//!
//! # Architecture
//!
//! * **Core**: 5-stage in-order pipeline driven by [`core::cpu::Cpu::tick`].
//! * **Hazards**: busy-bit tracked register validity with same-cycle
//!   forwarding from execute/memory results; one-cycle stall on load-use.
//! * **Control flow**: taken branches and JUMP flush the fetch/decode
//!   latches and redirect the PC on the following cycle.
//!
//! # Modules
//!
//! * `common`: shared error type.
//! * `config`: run mode and cycle-bound configuration.
//! * `core`: architectural state, pipeline latches, and stage implementations.
//! * `isa`: opcode enum, instruction record, and load-class classification.
//! * `sim`: assembly-text loader.
//! * `stats`: cycle/retirement counters and end-of-run report.

/// Shared error type for loader and simulation failures.
pub mod common;

/// Run configuration: execution mode and cycle bound.
pub mod config;

/// CPU core: architectural state, pipeline stages, and the tick driver.
pub mod core;

/// Instruction set: opcode enum, instruction record, decode helpers.
pub mod isa;

/// Program loader: parses assembly-text input into code memory.
pub mod sim;

/// Simulation statistics collection and reporting.
pub mod stats;
