//! Shared constants and the error type returned by the loader and the
//! simulation driver.

use std::fmt;

/// Number of general-purpose registers.
pub const REG_FILE_SIZE: usize = 16;

/// Number of addressable words in data memory.
pub const DATA_MEMORY_SIZE: usize = 4096;

/// The program counter value of the first instruction in code memory.
pub const CODE_START_ADDRESS: i32 = 4000;

/// Converts a program counter into a code memory index, rejecting
/// addresses before `CODE_START_ADDRESS` or not aligned to an instruction
/// boundary.
pub fn code_memory_index(pc: i32) -> Option<usize> {
    let offset = pc - CODE_START_ADDRESS;
    if offset < 0 || offset % 4 != 0 {
        None
    } else {
        Some((offset / 4) as usize)
    }
}

/// Fatal conditions that stop the simulator. There is no recoverable error
/// path: every variant here is surfaced to the caller and the process exits.
#[derive(Debug)]
pub enum SimError {
    /// The input program could not be read from disk.
    Io(std::io::Error),
    /// A line of the input program could not be parsed as an instruction.
    Parse { line: usize, message: String },
    /// The run mode named on the command line is not one of the supported
    /// modes.
    InvalidMode(String),
    /// Fetch advanced past the end of code memory without retiring a HALT.
    CodeMemoryOverrun { pc: i32 },
    /// A `LOAD`/`STORE`/`LDI`/`STI` addressed a word outside data memory.
    DataMemoryOverrun { addr: i32 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "could not read program file: {}", e),
            SimError::Parse { line, message } => {
                write!(f, "parse error on line {}: {}", line, message)
            }
            SimError::InvalidMode(mode) => write!(f, "invalid run mode: '{}'", mode),
            SimError::CodeMemoryOverrun { pc } => {
                write!(f, "fetch ran past the end of code memory at pc={}", pc)
            }
            SimError::DataMemoryOverrun { addr } => {
                write!(f, "memory access out of bounds at address={}", addr)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}
