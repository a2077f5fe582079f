pub mod compiler;
pub mod computer;
pub mod config;
pub mod error;
pub mod loader;

pub use computer::sink::{LineSink, Sink};
pub use computer::{Computer, State};
pub use config::ComputerConfig;
pub use error::{ComputerError, LoadError, Result};
