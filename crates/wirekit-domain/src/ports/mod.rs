//! Domain Port Interfaces
//!
//! Narrow interfaces through which consumers reach the finished container.

pub mod container;
pub mod http;

pub use container::{ServiceContainer, ServiceContainerExt};
pub use http::{RouterAdapter, ServerAdapter};
