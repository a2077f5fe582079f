#[allow(clippy::module_inception)]
pub mod compiler;
pub mod instructions;
