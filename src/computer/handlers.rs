//! Instruction semantics. Every handler validates its register indices and
//! addresses before mutating state so a failing step leaves the computer as
//! it was.

use crate::computer::alu::AluOp;
use crate::computer::dispatch::{Decoded, Flow};
use crate::computer::registers::FL_EQUAL;
use crate::computer::sink::Sink;
use crate::computer::Computer;
use crate::error::{ComputerError, Result};

pub fn halt<S: Sink>(_: &mut Computer<S>, _: &Decoded) -> Result<Flow> {
    Ok(Flow::Halt)
}

pub fn load_immediate<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    computer
        .registers
        .set(decoded.operand(0), decoded.operand(1))?;
    Ok(Flow::Next)
}

pub fn alu<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let op = AluOp::try_from(decoded.opcode)?;
    computer.alu(op, decoded.operand(0), decoded.operand(1))?;
    Ok(Flow::Next)
}

pub fn print<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let value = computer.registers.get(decoded.operand(0))?;
    computer.sink.emit(value).map_err(ComputerError::Output)?;
    Ok(Flow::Next)
}

pub fn push<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let value = computer.registers.get(decoded.operand(0))?;
    computer.push(value)?;
    Ok(Flow::Next)
}

/// `POP R7` leaves the popped value in the stack pointer.
pub fn pop<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    computer.registers.check(decoded.operand(0))?;
    let value = computer.pop()?;
    computer.registers.set(decoded.operand(0), value)?;
    Ok(Flow::Next)
}

pub fn call<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let target = computer.registers.get(decoded.operand(0))?;
    let return_address = decoded.pc + 2;
    let return_address = u8::try_from(return_address)
        .map_err(|_| ComputerError::OutOfRangeAddress(return_address))?;

    computer.push(return_address)?;
    Ok(Flow::Jump(target as usize))
}

pub fn ret<S: Sink>(computer: &mut Computer<S>, _: &Decoded) -> Result<Flow> {
    let return_address = computer.pop()?;
    Ok(Flow::Jump(return_address as usize))
}

pub fn jump<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let target = computer.registers.get(decoded.operand(0))?;
    Ok(Flow::Jump(target as usize))
}

pub fn jump_if_equal<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let target = computer.registers.get(decoded.operand(0))?;
    Ok(match computer.registers.flags() == FL_EQUAL {
        true => Flow::Jump(target as usize),
        false => Flow::Next,
    })
}

pub fn jump_if_not_equal<S: Sink>(computer: &mut Computer<S>, decoded: &Decoded) -> Result<Flow> {
    let target = computer.registers.get(decoded.operand(0))?;
    Ok(match computer.registers.flags() != FL_EQUAL {
        true => Flow::Jump(target as usize),
        false => Flow::Next,
    })
}
