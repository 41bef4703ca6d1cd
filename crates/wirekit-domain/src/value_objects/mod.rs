//! Value Objects
//!
//! Immutable values passed between the wiring layers.

pub mod argument;
pub mod descriptor;
pub mod instance;
pub mod route;

pub use argument::{ArgumentToken, Sigil};
pub use descriptor::{ContainerConfiguration, ServiceDescriptor};
pub use instance::Instance;
pub use route::{HttpMethod, ResolvedRoute, RouteConfig, RouteDefinition};
