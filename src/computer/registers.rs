use crate::error::{ComputerError, Result};

pub const REGISTER_COUNT: usize = 8;
/// R7 holds the stack pointer for PUSH, POP, CALL and RET alike.
pub const STACK_POINTER: u8 = 7;

pub const FL_EQUAL: u8 = 0b001;
pub const FL_LESS: u8 = 0b010;
pub const FL_GREATER: u8 = 0b011;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    general: [u8; REGISTER_COUNT],
    flags: u8,
}

impl Registers {
    pub fn new(stack_top: u8) -> Registers {
        let mut general = [0; REGISTER_COUNT];
        general[STACK_POINTER as usize] = stack_top;

        Registers { general, flags: 0 }
    }

    pub fn get(&self, index: u8) -> Result<u8> {
        self.general
            .get(index as usize)
            .copied()
            .ok_or(ComputerError::OutOfRangeRegister(index))
    }

    pub fn set(&mut self, index: u8, value: u8) -> Result<()> {
        let slot = self
            .general
            .get_mut(index as usize)
            .ok_or(ComputerError::OutOfRangeRegister(index))?;
        *slot = value;
        Ok(())
    }

    /// Fails before anything is mutated if `index` is not a register.
    pub fn check(&self, index: u8) -> Result<()> {
        self.get(index).map(|_| ())
    }

    pub fn stack_pointer(&self) -> u8 {
        self.general[STACK_POINTER as usize]
    }

    pub fn set_stack_pointer(&mut self, value: u8) {
        self.general[STACK_POINTER as usize] = value
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn set_flags(&mut self, flags: u8) {
        self.flags = flags
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.general
    }
}
