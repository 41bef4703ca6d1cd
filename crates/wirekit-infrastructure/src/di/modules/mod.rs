//! Configuration modules
//!
//! A module owns one root namespace of the configuration tree. The registry
//! validates each subtree against its module's schema, then lets the module map
//! it into parameters.

pub mod app_module;
pub mod registry;
pub mod traits;

pub use app_module::AppModule;
pub use registry::{ModuleRegistry, ModuleState};
pub use traits::ConfigModule;

use std::sync::Arc;

use crate::config::ModuleKind;

/// Instantiate a built-in module
pub fn builtin(kind: ModuleKind) -> Arc<dyn ConfigModule> {
    match kind {
        ModuleKind::App => Arc::new(AppModule),
    }
}
