use ahash::AHashMap;

use crate::compiler::instructions::Instruction;

/// Execution counts per opcode.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    counts: AHashMap<u8, u64>,
}

impl Profile {
    pub fn record(&mut self, opcode: u8) {
        *self.counts.entry(opcode).or_insert(0) += 1;
    }

    pub fn count(&self, instruction: Instruction) -> u64 {
        self.counts
            .get(&instruction.opcode())
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Most executed first, ties broken by mnemonic.
    pub fn rows(&self) -> Vec<(&'static str, u64)> {
        let mut rows = self
            .counts
            .iter()
            .filter_map(|(&opcode, &count)| {
                Instruction::try_from(opcode)
                    .ok()
                    .map(|instruction| (instruction.mnemonic(), count))
            })
            .collect::<Vec<_>>();

        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_sorted_by_count() {
        let mut profile = Profile::default();
        for opcode in [0b1000_0010, 0b0100_0111, 0b1000_0010, 0b0000_0001, 0b1000_0010] {
            profile.record(opcode);
        }

        assert_eq!(profile.rows(), vec![("LDI", 3), ("HLT", 1), ("PRN", 1)]);
        assert_eq!(profile.count(Instruction::LoadImmediate), 3);
        assert_eq!(profile.count(Instruction::Call), 0);
        assert_eq!(profile.total(), 5);
    }
}
