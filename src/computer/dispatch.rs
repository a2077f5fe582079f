use smallvec::SmallVec;

use crate::compiler::instructions::Instruction;
use crate::computer::handlers;
use crate::computer::sink::Sink;
use crate::computer::Computer;
use crate::error::Result;

pub type Operands = SmallVec<[u8; 2]>;

/// A fetched instruction with its operand bytes already read from memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub pc: usize,
    pub opcode: u8,
    pub operands: Operands,
}

impl Decoded {
    /// Operand `i`. The engine reads exactly as many operands as the opcode
    /// encodes, so handlers index within that count.
    pub fn operand(&self, i: usize) -> u8 {
        self.operands[i]
    }
}

/// What the engine does with the program counter once a handler returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Advance past the opcode and its operands.
    Next,
    Jump(usize),
    Halt,
}

pub type Handler<S> = fn(&mut Computer<S>, &Decoded) -> Result<Flow>;

pub struct DispatchTable<S> {
    handlers: [Option<Handler<S>>; 256],
}

impl<S: Sink> Default for DispatchTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sink> DispatchTable<S> {
    pub fn new() -> DispatchTable<S> {
        let mut table = DispatchTable {
            handlers: [None; 256],
        };

        table.register(Instruction::Halt, handlers::halt);
        table.register(Instruction::LoadImmediate, handlers::load_immediate);
        table.register(Instruction::Print, handlers::print);
        table.register(Instruction::Push, handlers::push);
        table.register(Instruction::Pop, handlers::pop);
        table.register(Instruction::Call, handlers::call);
        table.register(Instruction::Return, handlers::ret);
        table.register(Instruction::Jump, handlers::jump);
        table.register(Instruction::JumpIfEqual, handlers::jump_if_equal);
        table.register(Instruction::JumpIfNotEqual, handlers::jump_if_not_equal);
        for instruction in [
            Instruction::Add,
            Instruction::Sub,
            Instruction::Mul,
            Instruction::Div,
            Instruction::Compare,
        ] {
            table.register(instruction, handlers::alu);
        }

        table
    }

    pub fn register(&mut self, instruction: Instruction, handler: Handler<S>) {
        self.handlers[instruction.opcode() as usize] = Some(handler);
    }

    pub fn get(&self, opcode: u8) -> Option<Handler<S>> {
        self.handlers[opcode as usize]
    }
}
