//! HTTP Adapter Ports
//!
//! Contracts for the router and server adapters selected by the HTTP kernel.
//! Adapters are registered as services tagged `router` / `server`; the kernel picks
//! the first one matching the configured type.

use crate::error::Result;
use crate::value_objects::{Instance, ResolvedRoute};
use serde_json::Value;

/// A routing backend, e.g. an express-style router
pub trait RouterAdapter: Send + Sync {
    /// Adapter name used in logs
    fn name(&self) -> &str;

    /// Whether this adapter serves the configured router type
    fn matches(&self, router_type: &str) -> bool;

    /// Prepare the adapter before routes are added
    fn register(&self) -> Result<()> {
        Ok(())
    }

    /// Add one route handled by `controller`
    fn register_route(&self, route: &ResolvedRoute, controller: Instance) -> Result<()>;
}

/// A deployment target that runs a router
pub trait ServerAdapter: Send + Sync {
    /// Adapter name used in logs
    fn name(&self) -> &str;

    /// Whether this adapter serves the configured server type
    fn supports(&self, server_type: &str) -> bool;

    /// Start serving the routes of `router`
    fn boot(&self, router: &dyn RouterAdapter, options: &Value) -> Result<()>;
}
