//! Configuration types module

pub mod kernel;
pub mod logging;

pub use kernel::{KernelSettings, ModuleKind};
pub use logging::LoggingConfig;
