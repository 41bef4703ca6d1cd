//! # wirekit domain layer
//!
//! Core types shared by every wirekit layer:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | The crate-wide [`Error`] and [`Result`] |
//! | [`value_objects`] | Instances, argument tokens, service descriptors, routes |
//! | [`ports`] | The container query interface and HTTP adapter contracts |
//! | [`constants`] | Well-known binding ids and parameter names |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{RouterAdapter, ServerAdapter, ServiceContainer, ServiceContainerExt};
pub use value_objects::{ArgumentToken, Instance, RouteDefinition, ServiceDescriptor};
