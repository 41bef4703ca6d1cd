//! HTTP Kernel
//!
//! Hands a bootstrapped container to the HTTP layer. The kernel reads the routing
//! configuration, selects the router and server adapters matching the configured
//! types among the services tagged `router` and `server`, registers every route on
//! the router and boots the server. Transport itself belongs to the adapters.
//!
//! The kernel is an injectable implementation; the usual wiring is
//!
//! ```json
//! "app/components/kernel/http-kernel": {
//!     "arguments": ["@container", "%app_router_type%", "%app_server_type%", "%kernel_project_dir%"]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};
use wirekit_domain::constants::{HTTP_KERNEL_ID, ROUTER_TAG, SERVER_TAG};
use wirekit_domain::error::{Error, Result};
use wirekit_domain::ports::{RouterAdapter, ServerAdapter, ServiceContainer, ServiceContainerExt};
use wirekit_domain::value_objects::{
    HttpMethod, Instance, ResolvedRoute, RouteConfig, RouteDefinition,
};

use crate::ports::registry::{IMPLEMENTATIONS, ImplementationEntry, InjectedArguments};

/// Routing configuration file, relative to the project directory
pub const ROUTE_CONFIG_FILE: &str = "config/router.json";

/// Selects adapters from the container and wires routes into them
pub struct HttpKernel {
    container: Arc<dyn ServiceContainer>,
    router_type: String,
    server_type: String,
    route_config: PathBuf,
}

impl HttpKernel {
    /// Create a kernel reading routes from `<project_dir>/config/router.json`
    pub fn new(
        container: Arc<dyn ServiceContainer>,
        router_type: impl Into<String>,
        server_type: impl Into<String>,
        project_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            container,
            router_type: router_type.into(),
            server_type: server_type.into(),
            route_config: project_dir.as_ref().join(ROUTE_CONFIG_FILE),
        }
    }

    /// Read routes from another file
    pub fn with_route_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.route_config = path.into();
        self
    }

    /// Path of the routing configuration
    pub fn route_config_path(&self) -> &Path {
        &self.route_config
    }

    /// Register every configured route on the matched router
    pub fn initialize(&self) -> Result<Arc<dyn RouterAdapter>> {
        let router = self.matched_router()?;
        router.register()?;

        let config = self.load_route_config()?;
        for definition in &config.routes {
            let route = self.resolve_route(definition)?;
            let controller = self.resolve_controller(&route)?;
            debug!(
                path = %route.path,
                method = %route.method,
                action = %route.action,
                "Registering route"
            );
            router.register_route(&route, controller)?;
        }

        info!(
            router = router.name(),
            routes = config.routes.len(),
            "HTTP kernel initialized"
        );
        Ok(router)
    }

    /// Boot the matched server on the matched router
    pub fn boot_server(&self, options: &Value) -> Result<()> {
        let router = self.matched_router()?;
        let server = self.matched_server()?;
        info!(server = server.name(), router = router.name(), "Booting server");
        server.boot(router.as_ref(), options)
    }

    /// Initialize routes, then boot the server
    pub fn run(&self, options: &Value) -> Result<()> {
        let router = self.initialize()?;
        let server = self.matched_server()?;
        info!(server = server.name(), router = router.name(), "Booting server");
        server.boot(router.as_ref(), options)
    }

    /// First router adapter matching the configured router type
    pub fn matched_router(&self) -> Result<Arc<dyn RouterAdapter>> {
        self.tagged::<Arc<dyn RouterAdapter>>(ROUTER_TAG)?
            .into_iter()
            .map(|router| (*router).clone())
            .find(|router| router.matches(&self.router_type))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "there's no matched router for type: \"{}\"",
                    self.router_type
                ))
            })
    }

    /// First server adapter supporting the configured server type
    pub fn matched_server(&self) -> Result<Arc<dyn ServerAdapter>> {
        self.tagged::<Arc<dyn ServerAdapter>>(SERVER_TAG)?
            .into_iter()
            .map(|server| (*server).clone())
            .find(|server| server.supports(&self.server_type))
            .ok_or_else(|| {
                Error::configuration(format!(
                    "there's no supported server for type: \"{}\"",
                    self.server_type
                ))
            })
    }

    /// Load and check the routing configuration
    pub fn load_route_config(&self) -> Result<RouteConfig> {
        let path = &self.route_config;
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::missing_route_config_with_source(
                format!("Unable to read \"{}\"", path.display()),
                e,
            )
        })?;
        let config: RouteConfig = serde_json::from_str(&content).map_err(|e| {
            Error::missing_route_config_with_source(
                format!("Unable to parse \"{}\"", path.display()),
                e,
            )
        })?;

        if config.routes.is_empty() {
            return Err(Error::missing_route_config(format!(
                "\"routes\" not defined in \"{}\"",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Apply defaults to a route and check it
    pub fn resolve_route(&self, definition: &RouteDefinition) -> Result<ResolvedRoute> {
        let controller = definition
            .controller
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                Error::missing_controller(format!(
                    "Undefined \"controller\" property in \"{}\"",
                    self.route_config.display()
                ))
            })?;

        if definition.path.is_empty() {
            return Err(Error::missing_route_config(format!(
                "Undefined or empty \"path\" property in \"{}\"",
                self.route_config.display()
            )));
        }

        let method = match definition.method.as_deref().filter(|m| !m.is_empty()) {
            Some(method) => method.parse::<HttpMethod>().map_err(|e| {
                Error::configuration(format!("{e} in \"{}\"", self.route_config.display()))
            })?,
            None => HttpMethod::default(),
        };

        let action = match definition.action.as_deref().filter(|a| !a.is_empty()) {
            Some(action) => format!("{action}_action"),
            None => format!("{method}_action"),
        };

        Ok(ResolvedRoute {
            controller: controller.to_owned(),
            path: definition.path.clone(),
            method,
            action,
        })
    }

    fn resolve_controller(&self, route: &ResolvedRoute) -> Result<Instance> {
        if !self.container.is_bound(&route.controller) {
            return Err(Error::missing_controller(format!(
                "Unable to load \"{}\" for route \"{}\"",
                route.controller, route.path
            )));
        }
        self.container.get(&route.controller)
    }

    fn tagged<T: std::any::Any + Send + Sync>(&self, tag: &str) -> Result<Vec<Arc<T>>> {
        if !self.container.is_bound(tag) {
            return Ok(Vec::new());
        }
        self.container.get_all_as::<T>(tag)
    }
}

fn http_kernel_factory(args: &InjectedArguments) -> std::result::Result<Instance, String> {
    Ok(Instance::new(HttpKernel::new(
        args.container(0)?,
        args.str(1)?,
        args.str(2)?,
        args.str(3)?,
    )))
}

#[linkme::distributed_slice(IMPLEMENTATIONS)]
static HTTP_KERNEL: ImplementationEntry = ImplementationEntry {
    path: HTTP_KERNEL_ID,
    description: "Selects router and server adapters and registers configured routes",
    parameters: &["container", "router_type", "server_type", "project_dir"],
    factory: http_kernel_factory,
};
