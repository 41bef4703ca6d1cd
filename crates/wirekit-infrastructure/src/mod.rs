//! # Infrastructure Layer
//!
//! Turns configuration into a frozen service container.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Kernel settings (figment), configuration tree and service documents, JSON Schema validation |
//! | [`constants`] | Centralized infrastructure constants |
//!
//! ### Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Container, parameter flattening, reference resolution, module registry and the bootstrap `Kernel` |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use di::{Container, ContainerBuilder, Kernel};
pub use error_ext::ErrorContext;
