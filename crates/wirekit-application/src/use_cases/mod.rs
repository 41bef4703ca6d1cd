//! Use cases operating on a bootstrapped container

pub mod http_kernel;

pub use http_kernel::{HttpKernel, ROUTE_CONFIG_FILE};
