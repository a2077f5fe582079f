use log::debug;

use crate::error::{ComputerError, LoadError, Result};

pub const MEMORY_SIZE: usize = 256;

/// Unified instruction, data and stack memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    ram: [u8; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            ram: [0; MEMORY_SIZE],
        }
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.ram
            .get(address)
            .copied()
            .ok_or(ComputerError::OutOfRangeAddress(address))
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .ram
            .get_mut(address)
            .ok_or(ComputerError::OutOfRangeAddress(address))?;
        *cell = value;
        Ok(())
    }

    /// Copies `program` to address 0. Nothing is written if it does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MEMORY_SIZE {
            return Err(LoadError::ProgramTooLarge { len: program.len() }.into());
        }

        self.ram[..program.len()].copy_from_slice(program);
        debug!("loaded {} bytes into memory", program.len());
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ram
    }
}
