pub mod alu;
pub mod dispatch;
pub mod handlers;
pub mod memory;
pub mod profile;
pub mod registers;
pub mod sink;

use log::{info, trace, warn};

use crate::compiler::instructions::{disassemble, operand_count};
use crate::config::ComputerConfig;
use crate::error::{ComputerError, Result};

use alu::{AluOp, Outcome};
use dispatch::{Decoded, DispatchTable, Flow, Handler, Operands};
use memory::Memory;
use profile::Profile;
use registers::Registers;
use sink::Sink;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Halted,
    Running,
}

pub struct Computer<S> {
    memory: Memory,
    registers: Registers,
    program_counter: usize,
    state: State,

    config: ComputerConfig,
    dispatch: DispatchTable<S>,
    profile: Option<Profile>,
    sink: S,
}

impl<S: Sink> Computer<S> {
    pub fn new(sink: S) -> Computer<S> {
        Computer::with_config(sink, ComputerConfig::default())
    }

    pub fn with_config(sink: S, config: ComputerConfig) -> Computer<S> {
        Computer {
            memory: Memory::new(),
            registers: Registers::new(config.stack_top),
            program_counter: 0,
            state: State::Halted,
            config,
            dispatch: DispatchTable::new(),
            profile: config.profile.then(Profile::default),
            sink,
        }
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load(program)
    }

    /// Runs until HLT and returns the number of instructions executed,
    /// HLT included.
    pub fn run(&mut self) -> Result<u64> {
        self.state = State::Running;
        let mut steps = 0;

        while self.state == State::Running {
            if let Some(limit) = self.config.step_limit {
                if steps >= limit {
                    self.state = State::Halted;
                    warn!("stopping at pc {:#04x} after {limit} steps", self.program_counter);
                    return Err(ComputerError::StepLimitExceeded(limit));
                }
            }

            if let Err(e) = self.step() {
                self.state = State::Halted;
                return Err(e);
            }
            steps += 1;
        }

        info!("halted after {steps} steps");
        Ok(steps)
    }

    /// Executes one instruction. Returns whether the computer is still
    /// running afterwards. A failed step changes nothing.
    pub fn step(&mut self) -> Result<bool> {
        let (decoded, handler) = self.fetch()?;

        trace!(
            "{} {}",
            self.trace(),
            disassemble(&self.memory.as_slice()[decoded.pc..]).unwrap_or_default()
        );
        let flow = handler(self, &decoded)?;

        if let Some(profile) = &mut self.profile {
            profile.record(decoded.opcode);
        }

        match flow {
            Flow::Next => {
                self.program_counter = decoded.pc + 1 + decoded.operands.len();
                self.state = State::Running;
            }
            Flow::Jump(address) => {
                self.program_counter = address;
                self.state = State::Running;
            }
            Flow::Halt => self.state = State::Halted,
        }

        Ok(self.state == State::Running)
    }

    fn fetch(&self) -> Result<(Decoded, Handler<S>)> {
        let pc = self.program_counter;
        let opcode = self.memory.read(pc)?;
        let handler = self
            .dispatch
            .get(opcode)
            .ok_or(ComputerError::UnknownOpcode { opcode, pc })?;

        let operands = (1..=operand_count(opcode))
            .map(|offset| self.memory.read(pc + offset))
            .collect::<Result<Operands>>()?;

        Ok((
            Decoded {
                pc,
                opcode,
                operands,
            },
            handler,
        ))
    }

    /// `reg[a] = reg[a] op reg[b]`, or for CMP, the flags. Fails without
    /// touching any register.
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<()> {
        let a = self.registers.get(reg_a)?;
        let b = self.registers.get(reg_b)?;

        match alu::compute(op, a, b)? {
            Outcome::Register(value) => self.registers.set(reg_a, value),
            Outcome::Flags(flags) => {
                self.registers.set_flags(flags);
                Ok(())
            }
        }
    }

    fn push(&mut self, value: u8) -> Result<()> {
        let stack_pointer = self.registers.stack_pointer().wrapping_sub(1);
        self.memory.write(stack_pointer as usize, value)?;
        self.registers.set_stack_pointer(stack_pointer);
        Ok(())
    }

    fn pop(&mut self) -> Result<u8> {
        let stack_pointer = self.registers.stack_pointer();
        let value = self.memory.read(stack_pointer as usize)?;
        self.registers.set_stack_pointer(stack_pointer.wrapping_add(1));
        Ok(value)
    }

    /// `TRACE: PC | M[PC] M[PC+1] M[PC+2] | R0 .. R7`
    pub fn trace(&self) -> String {
        let cells = (0..3)
            .map(|offset| match self.memory.read(self.program_counter + offset) {
                Ok(byte) => format!("{byte:02X}"),
                Err(_) => "--".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");

        let registers = self
            .registers
            .as_slice()
            .iter()
            .map(|value| format!(" {value:02X}"))
            .collect::<String>();

        format!(
            "TRACE: {:02X} | {cells} |{registers}",
            self.program_counter
        )
    }
}

impl<S> Computer<S> {
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn flags(&self) -> u8 {
        self.registers.flags()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
