use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ComputerError>;

#[derive(Debug, Error)]
pub enum ComputerError {
    #[error("memory address {0:#04x} is outside 0x00..=0xff")]
    OutOfRangeAddress(usize),
    #[error("register index {0} is outside R0..=R7")]
    OutOfRangeRegister(u8),
    #[error("unknown opcode {opcode:#010b} at pc {pc:#04x}")]
    UnknownOpcode { opcode: u8, pc: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("opcode {0:#010b} is not an alu operation")]
    UnsupportedOperation(u8),
    #[error("stopped after {0} steps without halting")]
    StepLimitExceeded(u64),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("failed to write output")]
    Output(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: `{text}` is not an 8-digit binary literal")]
    InvalidLiteral { line: usize, text: String },
    #[error("program is {len} bytes but memory holds 256")]
    ProgramTooLarge { len: usize },
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic { line: usize, mnemonic: String },
    #[error("line {line}: {mnemonic} takes {expected} operand(s), found {found}")]
    OperandCount {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid operand `{operand}`")]
    InvalidOperand { line: usize, operand: String },
    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel { line: usize, label: String },
    #[error("line {line}: label `{label}` defined twice")]
    DuplicateLabel { line: usize, label: String },
    #[error("failed to read program")]
    Io(#[from] io::Error),
}
