//! Dependency Injection System
//!
//! Configuration-driven wiring. Nothing here knows concrete services: module
//! paths are looked up in the linkme-backed registries of `wirekit-application`
//! and arguments are resolved from their sigils.
//!
//! ## Architecture Overview
//!
//! ```text
//! Kernel (bootstrap)
//! ├── ModuleRegistry      configuration tree → parameters
//! ├── ServiceRegistrar    service descriptors → bindings
//! │   └── ReferenceResolver   @service %parameter% !module literal
//! └── ContainerBuilder ──build()──▶ Container
//! ```

pub mod bootstrap;
pub mod container;
pub mod modules;
pub mod parameters;
pub mod registrar;
pub mod resolver;

pub use bootstrap::{ConfigurationSource, Kernel};
pub use container::{Binding, BindingSummary, Container, ContainerBuilder, Dependency};
pub use modules::{AppModule, ConfigModule, ModuleRegistry, ModuleState};
pub use parameters::{flatten, flatten_with, register_parameters};
pub use registrar::ServiceRegistrar;
pub use resolver::ReferenceResolver;
