use std::cmp::Ordering;

use crate::compiler::instructions::Instruction;
use crate::computer::registers::{FL_EQUAL, FL_GREATER, FL_LESS};
use crate::error::{ComputerError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Cmp,
}

impl TryFrom<u8> for AluOp {
    type Error = ComputerError;

    fn try_from(opcode: u8) -> Result<Self> {
        match Instruction::try_from(opcode) {
            Ok(Instruction::Add) => Ok(AluOp::Add),
            Ok(Instruction::Sub) => Ok(AluOp::Sub),
            Ok(Instruction::Mul) => Ok(AluOp::Mul),
            Ok(Instruction::Div) => Ok(AluOp::Div),
            Ok(Instruction::Compare) => Ok(AluOp::Cmp),
            _ => Err(ComputerError::UnsupportedOperation(opcode)),
        }
    }
}

/// Where an ALU result lands: back in operand `a`'s register, or in the flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Register(u8),
    Flags(u8),
}

/// Arithmetic wraps modulo 256. CMP compares the unsigned register values.
pub fn compute(op: AluOp, a: u8, b: u8) -> Result<Outcome> {
    Ok(match op {
        AluOp::Add => Outcome::Register(a.wrapping_add(b)),
        AluOp::Sub => Outcome::Register(a.wrapping_sub(b)),
        AluOp::Mul => Outcome::Register(a.wrapping_mul(b)),
        AluOp::Div => Outcome::Register(a.checked_div(b).ok_or(ComputerError::DivisionByZero)?),
        AluOp::Cmp => Outcome::Flags(match a.cmp(&b) {
            Ordering::Equal => FL_EQUAL,
            Ordering::Less => FL_LESS,
            Ordering::Greater => FL_GREATER,
        }),
    })
}
