/// Initial stack pointer; the stack grows down from here.
pub const DEFAULT_STACK_TOP: u8 = 0xf4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComputerConfig {
    pub stack_top: u8,
    /// Stop with an error after this many instructions.
    pub step_limit: Option<u64>,
    pub profile: bool,
}

impl Default for ComputerConfig {
    fn default() -> Self {
        ComputerConfig {
            stack_top: DEFAULT_STACK_TOP,
            step_limit: None,
            profile: false,
        }
    }
}
