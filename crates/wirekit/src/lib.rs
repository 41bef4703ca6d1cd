//! # wirekit
//!
//! Declarative dependency-injection wiring. A JSON configuration tree feeds
//! configuration modules, container documents declare services whose arguments
//! reference other services (`@id`), parameters (`%name%`) and external modules
//! (`!name`), and the kernel freezes everything into one shared container.
//!
//! ## Example
//!
//! ```ignore
//! use wirekit::infrastructure::config::SettingsLoader;
//! use wirekit::infrastructure::Kernel;
//! use wirekit::domain::ports::ServiceContainerExt;
//!
//! let settings = SettingsLoader::new().with_project_dir(".").load()?;
//! let kernel = Kernel::new(settings);
//! let container = kernel.initialize()?;
//! let port = container.get_value("app_server_port")?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type, value objects, container and adapter ports
//! - `application` - Implementation and external module registries, HTTP kernel
//! - `infrastructure` - Configuration, container, resolver, modules, bootstrap
//! - `cli` - The `wirekit` command line

pub mod cli;

/// Domain layer - error type, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wirekit_domain::*;
}

/// Application layer - registries and container consumers
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use wirekit_application::*;
}

/// Infrastructure layer - configuration, container and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wirekit_infrastructure::*;
}

pub use wirekit_domain::error::{Error, Result};
pub use wirekit_infrastructure::{Container, ContainerBuilder, Kernel};
