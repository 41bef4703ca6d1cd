//! Application Ports
//!
//! Registration points that the infrastructure layer resolves configuration against.

pub mod registry;
