use phf::phf_map;

use crate::error::ComputerError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Instruction {
    Halt = 0b0000_0001,
    Return = 0b0001_0001,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Print = 0b0100_0111,
    Call = 0b0101_0000,
    Jump = 0b0101_0100,
    JumpIfEqual = 0b0101_0101,
    JumpIfNotEqual = 0b0101_0110,
    LoadImmediate = 0b1000_0010,
    Add = 0b1010_0000,
    Sub = 0b1010_0001,
    Mul = 0b1010_0010,
    Div = 0b1010_0011,
    Compare = 0b1010_0111,
}

pub const ALL: [Instruction; 15] = [
    Instruction::Halt,
    Instruction::Return,
    Instruction::Push,
    Instruction::Pop,
    Instruction::Print,
    Instruction::Call,
    Instruction::Jump,
    Instruction::JumpIfEqual,
    Instruction::JumpIfNotEqual,
    Instruction::LoadImmediate,
    Instruction::Add,
    Instruction::Sub,
    Instruction::Mul,
    Instruction::Div,
    Instruction::Compare,
];

pub static INSTRUCTION: phf::Map<&'static str, Instruction> = phf_map! {
    "HLT" => Instruction::Halt,
    "RET" => Instruction::Return,
    "PUSH" => Instruction::Push,
    "POP" => Instruction::Pop,
    "PRN" => Instruction::Print,
    "CALL" => Instruction::Call,
    "JMP" => Instruction::Jump,
    "JEQ" => Instruction::JumpIfEqual,
    "JNE" => Instruction::JumpIfNotEqual,
    "LDI" => Instruction::LoadImmediate,
    "ADD" => Instruction::Add,
    "SUB" => Instruction::Sub,
    "MUL" => Instruction::Mul,
    "DIV" => Instruction::Div,
    "CMP" => Instruction::Compare
};

/// Number of operand bytes following `opcode`, taken from its top two bits.
pub const fn operand_count(opcode: u8) -> usize {
    (opcode >> 6) as usize
}

impl Instruction {
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    pub const fn operand_count(self) -> usize {
        operand_count(self as u8)
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Halt => "HLT",
            Instruction::Return => "RET",
            Instruction::Push => "PUSH",
            Instruction::Pop => "POP",
            Instruction::Print => "PRN",
            Instruction::Call => "CALL",
            Instruction::Jump => "JMP",
            Instruction::JumpIfEqual => "JEQ",
            Instruction::JumpIfNotEqual => "JNE",
            Instruction::LoadImmediate => "LDI",
            Instruction::Add => "ADD",
            Instruction::Sub => "SUB",
            Instruction::Mul => "MUL",
            Instruction::Div => "DIV",
            Instruction::Compare => "CMP",
        }
    }

    /// Whether the second operand is an immediate byte rather than a register.
    pub const fn has_immediate(self) -> bool {
        matches!(self, Instruction::LoadImmediate)
    }
}

impl TryFrom<u8> for Instruction {
    type Error = u8;

    fn try_from(opcode: u8) -> Result<Self, Self::Error> {
        ALL.iter()
            .copied()
            .find(|instruction| instruction.opcode() == opcode)
            .ok_or(opcode)
    }
}

/// Renders the instruction starting at `bytes[0]`, e.g. `LDI R0,8`.
pub fn disassemble(bytes: &[u8]) -> Result<String, ComputerError> {
    let opcode = *bytes.first().ok_or(ComputerError::OutOfRangeAddress(0))?;
    let instruction = Instruction::try_from(opcode)
        .map_err(|opcode| ComputerError::UnknownOpcode { opcode, pc: 0 })?;

    let operands = (0..instruction.operand_count())
        .map(|i| {
            let byte = *bytes
                .get(i + 1)
                .ok_or(ComputerError::OutOfRangeAddress(i + 1))?;
            Ok(if i == 1 && instruction.has_immediate() {
                byte.to_string()
            } else {
                format!("R{byte}")
            })
        })
        .collect::<Result<Vec<_>, ComputerError>>()?;

    Ok(match operands.is_empty() {
        true => instruction.mnemonic().to_string(),
        false => format!("{} {}", instruction.mnemonic(), operands.join(",")),
    })
}
