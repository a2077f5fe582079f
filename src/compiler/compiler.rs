use ahash::AHashMap;

use crate::compiler::instructions::{Instruction, INSTRUCTION};
use crate::computer::memory::MEMORY_SIZE;
use crate::error::LoadError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Mnemonic {
    Instruction(Instruction),
    Data,
}

#[derive(Clone, Debug)]
struct Statement<'a> {
    line: usize,
    mnemonic: Mnemonic,
    operands: Vec<&'a str>,
}

impl Statement<'_> {
    fn size(&self) -> usize {
        match self.mnemonic {
            Mnemonic::Instruction(instruction) => 1 + instruction.operand_count(),
            Mnemonic::Data => self.operands.len(),
        }
    }
}

/// Splits `source` into statements and records the address of every label.
fn transpile_to_statements(
    source: &str,
) -> Result<(Vec<Statement<'_>>, AHashMap<&str, usize>), LoadError> {
    let mut statements = Vec::new();
    let mut labels: AHashMap<&str, usize> = AHashMap::new();
    let mut address = 0;

    for (i, line) in source.lines().enumerate() {
        let line_number = i + 1;
        let mut rest = line.split(';').next().unwrap_or_default().trim();

        while let Some((label, tail)) = rest.split_once(':') {
            let label = label.trim();
            if !is_identifier(label) {
                break;
            }
            if labels.insert(label, address).is_some() {
                return Err(LoadError::DuplicateLabel {
                    line: line_number,
                    label: label.to_string(),
                });
            }
            rest = tail.trim();
        }

        if rest.is_empty() {
            continue;
        }

        let (word, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let operands = tail
            .split(',')
            .map(str::trim)
            .filter(|operand| !operand.is_empty())
            .collect::<Vec<&str>>();

        let mnemonic = match word.to_ascii_uppercase().as_str() {
            "DB" => Mnemonic::Data,
            upper => match INSTRUCTION.get(upper) {
                Some(instruction) => Mnemonic::Instruction(*instruction),
                None => {
                    return Err(LoadError::UnknownMnemonic {
                        line: line_number,
                        mnemonic: word.to_string(),
                    })
                }
            },
        };

        let expected = match mnemonic {
            Mnemonic::Instruction(instruction) => instruction.operand_count(),
            Mnemonic::Data => operands.len().max(1),
        };
        if operands.len() != expected {
            return Err(LoadError::OperandCount {
                line: line_number,
                mnemonic: word.to_ascii_uppercase(),
                expected,
                found: operands.len(),
            });
        }

        let statement = Statement {
            line: line_number,
            mnemonic,
            operands,
        };
        address += statement.size();
        statements.push(statement);
    }

    Ok((statements, labels))
}

fn transpile_to_machine_code(
    statements_labels_pair: (Vec<Statement<'_>>, AHashMap<&str, usize>),
) -> Result<Vec<u8>, LoadError> {
    let (statements, labels) = statements_labels_pair;

    let mut machine_code = Vec::with_capacity(MEMORY_SIZE);

    for statement in statements.iter() {
        if let Mnemonic::Instruction(instruction) = statement.mnemonic {
            machine_code.push(instruction.opcode());
        }

        for (i, operand) in statement.operands.iter().enumerate() {
            let register_slot = match statement.mnemonic {
                Mnemonic::Instruction(instruction) => !(i == 1 && instruction.has_immediate()),
                Mnemonic::Data => false,
            };
            machine_code.push(resolve_operand(statement.line, operand, register_slot, &labels)?);
        }
    }

    if machine_code.len() > MEMORY_SIZE {
        return Err(LoadError::ProgramTooLarge {
            len: machine_code.len(),
        });
    }

    Ok(machine_code)
}

/// Register slots accept `R0`..`R7`, immediates accept numbers and labels.
fn resolve_operand(
    line: usize,
    operand: &str,
    register_slot: bool,
    labels: &AHashMap<&str, usize>,
) -> Result<u8, LoadError> {
    let invalid = || LoadError::InvalidOperand {
        line,
        operand: operand.to_string(),
    };

    if register_slot {
        return match operand.strip_prefix(['R', 'r']).map(str::parse::<u8>) {
            Some(Ok(index)) if index < 8 => Ok(index),
            _ => Err(invalid()),
        };
    }

    let value = if let Some(hex) = operand.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).map_err(|_| invalid())?
    } else if let Some(binary) = operand.strip_prefix("0b") {
        usize::from_str_radix(binary, 2).map_err(|_| invalid())?
    } else if operand.starts_with(|c: char| c.is_ascii_digit()) {
        operand.parse::<usize>().map_err(|_| invalid())?
    } else if is_identifier(operand) {
        *labels.get(operand).ok_or_else(|| LoadError::UndefinedLabel {
            line,
            label: operand.to_string(),
        })?
    } else {
        return Err(invalid());
    };

    u8::try_from(value).map_err(|_| invalid())
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Assembles LS-8 mnemonics into machine code loadable at address 0.
pub fn compile(source: &str) -> Result<Vec<u8>, LoadError> {
    transpile_to_machine_code(transpile_to_statements(source)?)
}
