//! # wirekit application layer
//!
//! Registries of injectable implementations and external modules, and the use cases
//! that consume a finished container.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ports::registry`] | linkme-backed implementation and external-module registries |
//! | [`use_cases`] | The HTTP kernel selecting router and server adapters |

pub mod ports;
pub mod use_cases;

pub use ports::registry::{
    EXTERNAL_MODULES, ExternalModuleEntry, ExternalModuleRegistry, IMPLEMENTATIONS,
    Implementation, ImplementationEntry, ImplementationRegistry, InjectedArguments,
    normalize_implementation_path,
};
pub use use_cases::HttpKernel;
