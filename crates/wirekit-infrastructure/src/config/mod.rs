//! Configuration
//!
//! Kernel settings, JSON configuration documents and schema validation.

pub mod loader;
pub mod schema;
pub mod types;

pub use loader::{ConfigLocator, SettingsLoader, deep_merge, read_json_document};
pub use schema::{SchemaValidator, ValidationReport, validate};
pub use types::{KernelSettings, LoggingConfig, ModuleKind};
