//! Assembly-text program loader.
//!
//! Reads a program as one instruction per line in the form
//! `OPCODE,OPERAND,OPERAND,...`, e.g. `ADD,R1,R2,R3`, `MOVC,R1,#5`, or
//! `BZ,#8`. Operands may be separated by commas, whitespace, or both
//! (`ADD R1 R2 R3` and `ADD,R1,R2,R3` both parse), blank lines and lines
//! starting with `#` are skipped, and register operands may be written
//! with or without a leading `R`.

use crate::common::{SimError, REG_FILE_SIZE};
use crate::isa::{Instruction, Opcode};
use std::fs;

pub fn load_program(path: &str) -> Result<Vec<Instruction>, SimError> {
    let text = fs::read_to_string(path)?;
    let mut program = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_number = line_no + 1;
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();

        let (mnemonic, operands) = fields.split_first().ok_or_else(|| SimError::Parse {
            line: line_number,
            message: "empty instruction line".to_string(),
        })?;

        let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| SimError::Parse {
            line: line_number,
            message: format!("unrecognized opcode '{}'", mnemonic),
        })?;

        program.push(parse_operands(opcode, operands, line_number)?);
    }

    Ok(program)
}

fn parse_operands(
    opcode: Opcode,
    operands: &[&str],
    line_number: usize,
) -> Result<Instruction, SimError> {
    use Opcode::*;

    let reg = |field: &str| -> Result<usize, SimError> {
        let digits = field.trim_start_matches(['R', 'r']);
        let index = digits.parse::<usize>().map_err(|_| SimError::Parse {
            line: line_number,
            message: format!("expected a register operand, found '{}'", field),
        })?;
        if index >= REG_FILE_SIZE {
            return Err(SimError::Parse {
                line: line_number,
                message: format!("register index '{}' is out of range [0, {})", field, REG_FILE_SIZE),
            });
        }
        Ok(index)
    };

    let imm = |field: &str| -> Result<i32, SimError> {
        let digits = field.trim_start_matches('#');
        digits.parse::<i32>().map_err(|_| SimError::Parse {
            line: line_number,
            message: format!("expected an immediate operand, found '{}'", field),
        })
    };

    let missing = |what: &str| SimError::Parse {
        line: line_number,
        message: format!("missing {} operand", what),
    };

    let mut instr = Instruction {
        opcode,
        ..Instruction::default()
    };

    match opcode {
        Add | Sub | Mul | Div | And | Or | Exor => {
            instr.rd = reg(operands.first().ok_or_else(|| missing("rd"))?)?;
            instr.rs1 = reg(operands.get(1).ok_or_else(|| missing("rs1"))?)?;
            instr.rs2 = reg(operands.get(2).ok_or_else(|| missing("rs2"))?)?;
        }
        Addl | Subl | Load => {
            instr.rd = reg(operands.first().ok_or_else(|| missing("rd"))?)?;
            instr.rs1 = reg(operands.get(1).ok_or_else(|| missing("rs1"))?)?;
            instr.imm = imm(operands.get(2).ok_or_else(|| missing("imm"))?)?;
        }
        Ldi => {
            instr.rd = reg(operands.first().ok_or_else(|| missing("rd"))?)?;
            instr.rs1 = reg(operands.get(1).ok_or_else(|| missing("rs1"))?)?;
            instr.imm = imm(operands.get(2).ok_or_else(|| missing("imm"))?)?;
        }
        Store => {
            instr.rs1 = reg(operands.first().ok_or_else(|| missing("rs1"))?)?;
            instr.rs2 = reg(operands.get(1).ok_or_else(|| missing("rs2"))?)?;
            instr.imm = imm(operands.get(2).ok_or_else(|| missing("imm"))?)?;
        }
        Sti => {
            instr.rs1 = reg(operands.first().ok_or_else(|| missing("rs1"))?)?;
            instr.rs2 = reg(operands.get(1).ok_or_else(|| missing("rs2"))?)?;
            instr.imm = imm(operands.get(2).ok_or_else(|| missing("imm"))?)?;
        }
        Movc => {
            instr.rd = reg(operands.first().ok_or_else(|| missing("rd"))?)?;
            instr.imm = imm(operands.get(1).ok_or_else(|| missing("imm"))?)?;
        }
        Cmp => {
            instr.rs1 = reg(operands.first().ok_or_else(|| missing("rs1"))?)?;
            instr.rs2 = reg(operands.get(1).ok_or_else(|| missing("rs2"))?)?;
        }
        Bz | Bnz | Bp | Bnp => {
            instr.imm = imm(operands.first().ok_or_else(|| missing("imm"))?)?;
        }
        Jump => {
            instr.rs1 = reg(operands.first().ok_or_else(|| missing("rs1"))?)?;
            instr.imm = imm(operands.get(1).ok_or_else(|| missing("imm"))?)?;
        }
        Nop | Halt => {}
    }

    Ok(instr)
}
