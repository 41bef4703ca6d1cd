//! Kernel Bootstrap
//!
//! The composition root. Builds the container from kernel settings and
//! configuration documents in a fixed order:
//!
//! ```text
//! KernelSettings
//!   → seed kernel_* parameters
//!   → configuration tree ──▶ ModuleRegistry ──▶ app_server_*, app_router_*
//!   → container documents ──▶ parameters (.) ──▶ ServiceRegistrar
//!   → bind `kernel` description
//!   → build() ──▶ Arc<Container>   (bound to itself as `container`)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let settings = SettingsLoader::new().with_project_dir(".").load()?;
//! let kernel = Kernel::new(settings);
//!
//! let container = kernel.initialize()?;
//! let port = container.parameter("app_server_port")?;
//!
//! kernel.boot(&serde_json::json!({}))?;
//! ```

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::{Map, Value, json};
use tracing::{debug, info};
use wirekit_application::{ExternalModuleRegistry, HttpKernel, ImplementationRegistry};
use wirekit_domain::constants::{
    CONTAINER_PARAMETER_SEPARATOR, HTTP_KERNEL_ID, KERNEL_ENVIRONMENT, KERNEL_ID,
    KERNEL_PROJECT_DIR, KERNEL_ROOT_DIR, PARAMETERS_ID,
};
use wirekit_domain::error::{Error, Result};
use wirekit_domain::ports::ServiceContainerExt;
use wirekit_domain::value_objects::ContainerConfiguration;

use crate::config::loader::{ConfigLocator, deep_merge, read_json_document};
use crate::config::KernelSettings;
use crate::di::container::{Container, ContainerBuilder};
use crate::di::modules::{self, ConfigModule, ModuleRegistry, ModuleState};
use crate::di::parameters::flatten_with;
use crate::di::registrar::ServiceRegistrar;
use crate::di::resolver::ReferenceResolver;

/// Origin reported for inline configuration trees
const INLINE_TREE_ORIGIN: &str = "inline configuration";

/// Where the configuration tree and container documents come from
#[derive(Debug, Clone, Default)]
pub enum ConfigurationSource {
    /// Files under the configured directory, layered by environment
    #[default]
    Directory,
    /// Documents passed in directly
    Inline {
        /// Configuration tree
        tree: Value,
        /// Container documents, applied in order
        documents: Vec<Value>,
    },
}

impl ConfigurationSource {
    /// Inline source from a tree and container documents
    pub fn inline(tree: Value, documents: Vec<Value>) -> Self {
        Self::Inline { tree, documents }
    }
}

/// Result of one successful initialization
#[derive(Debug)]
struct Bootstrapped {
    container: Arc<Container>,
    module_states: Vec<(String, ModuleState)>,
}

/// Bootstraps a container from settings and configuration
pub struct Kernel {
    settings: KernelSettings,
    modules: Vec<Arc<dyn ConfigModule>>,
    implementations: ImplementationRegistry,
    externals: ExternalModuleRegistry,
    source: ConfigurationSource,
    bootstrapped: OnceCell<Bootstrapped>,
}

impl Kernel {
    /// Create a kernel with the built-in modules named in the settings and every
    /// linked implementation and external module
    pub fn new(settings: KernelSettings) -> Self {
        let modules = settings.modules.iter().copied().map(modules::builtin).collect();
        Self {
            settings,
            modules,
            implementations: ImplementationRegistry::from_linked(),
            externals: ExternalModuleRegistry::from_linked(),
            source: ConfigurationSource::Directory,
            bootstrapped: OnceCell::new(),
        }
    }

    /// Append a custom module, processed after the built-in ones
    pub fn with_module(mut self, module: Arc<dyn ConfigModule>) -> Self {
        self.modules.push(module);
        self
    }

    /// Replace the implementation registry
    pub fn with_implementations(mut self, implementations: ImplementationRegistry) -> Self {
        self.implementations = implementations;
        self
    }

    /// Replace the external module registry
    pub fn with_external_modules(mut self, externals: ExternalModuleRegistry) -> Self {
        self.externals = externals;
        self
    }

    /// Replace the configuration source
    pub fn with_configuration(mut self, source: ConfigurationSource) -> Self {
        self.source = source;
        self
    }

    /// Kernel settings
    pub fn settings(&self) -> &KernelSettings {
        &self.settings
    }

    /// Implementation registry used for service lookup
    pub fn implementations(&self) -> &ImplementationRegistry {
        &self.implementations
    }

    /// External module registry used for `!module` references
    pub fn external_modules(&self) -> &ExternalModuleRegistry {
        &self.externals
    }

    /// Build the container once; later calls return the same container
    ///
    /// A failed initialization leaves the kernel uninitialized.
    pub fn initialize(&self) -> Result<Arc<Container>> {
        self.bootstrapped
            .get_or_try_init(|| self.bootstrap())
            .map(|state| state.container.clone())
    }

    /// The container, once initialized
    pub fn container(&self) -> Option<Arc<Container>> {
        self.bootstrapped.get().map(|state| state.container.clone())
    }

    /// Final module states, once initialized
    pub fn module_states(&self) -> Option<&[(String, ModuleState)]> {
        self.bootstrapped
            .get()
            .map(|state| state.module_states.as_slice())
    }

    /// Every declared parameter, initializing first when needed
    pub fn parameters(&self) -> Result<Map<String, Value>> {
        match self.initialize()?.get_value(PARAMETERS_ID)? {
            Value::Object(parameters) => Ok(parameters),
            other => Err(Error::internal(format!(
                "\"{PARAMETERS_ID}\" is bound to a non-object value: {other}"
            ))),
        }
    }

    /// Resolve the HTTP kernel, register routes and boot the server
    pub fn boot(&self, options: &Value) -> Result<()> {
        let container = self.initialize()?;
        let http_kernel = container.get_as::<HttpKernel>(HTTP_KERNEL_ID)?;
        http_kernel.run(options)
    }

    fn bootstrap(&self) -> Result<Bootstrapped> {
        let project_dir = self.settings.project_dir();
        info!(
            environment = %self.settings.environment,
            project_dir = %project_dir.display(),
            "Bootstrapping kernel"
        );

        let mut builder = ContainerBuilder::new();
        self.seed_kernel_parameters(&mut builder, &project_dir);

        let tree = self.load_tree()?;

        let mut registry = ModuleRegistry::new();
        for module in &self.modules {
            registry.add(module.clone());
        }
        registry.process_all(&mut builder, &tree)?;

        let documents = self.load_documents()?;
        for (origin, document) in &documents {
            let parameters = flatten_with(
                &Value::Object(document.parameters.clone()),
                "",
                CONTAINER_PARAMETER_SEPARATOR,
            );
            debug!(origin = %origin, count = parameters.len(), "Loading parameters");
            builder.merge_parameters(parameters);
        }

        let resolver = ReferenceResolver::new(&self.externals);
        let registrar =
            ServiceRegistrar::new(&self.implementations, resolver).with_project_dir(&project_dir);
        for (origin, document) in &documents {
            registrar
                .register_all(&mut builder, &document.services)
                .map_err(|e| Error::bootstrap(origin.as_str(), e))?;
        }

        self.bind_kernel(&mut builder, &project_dir);
        let container = builder
            .build()
            .map_err(|e| Error::bootstrap("container", e))?;
        if self.settings.eager_singletons {
            container
                .preload()
                .map_err(|e| Error::bootstrap("eager_singletons", e))?;
        }

        info!("Kernel initialized");
        Ok(Bootstrapped {
            container,
            module_states: registry.states(),
        })
    }

    fn seed_kernel_parameters(&self, builder: &mut ContainerBuilder, project_dir: &Path) {
        let mut parameters = Map::new();
        parameters.insert(
            KERNEL_ROOT_DIR.to_owned(),
            Value::String(self.settings.root_dir().display().to_string()),
        );
        parameters.insert(
            KERNEL_PROJECT_DIR.to_owned(),
            Value::String(project_dir.display().to_string()),
        );
        parameters.insert(
            KERNEL_ENVIRONMENT.to_owned(),
            Value::String(self.settings.environment.clone()),
        );
        builder.merge_parameters(parameters);
    }

    fn bind_kernel(&self, builder: &mut ContainerBuilder, project_dir: &Path) {
        let description = json!({
            "environment": self.settings.environment,
            "project_dir": project_dir.display().to_string(),
            "root_dir": self.settings.root_dir().display().to_string(),
            "modules": self.modules.iter().map(|m| m.name().to_owned()).collect::<Vec<_>>(),
            "eager_singletons": self.settings.eager_singletons,
        });
        builder.bind_constant(KERNEL_ID, description);
    }

    fn load_tree(&self) -> Result<Value> {
        let files = match &self.source {
            ConfigurationSource::Inline { tree, .. } => {
                debug!(origin = INLINE_TREE_ORIGIN, "Using inline configuration tree");
                return Ok(tree.clone());
            }
            ConfigurationSource::Directory => {
                ConfigLocator::from_settings(&self.settings).config_tree_files()
            }
        };

        let mut tree: Option<Value> = None;
        for path in &files {
            let document =
                read_json_document(path).map_err(|e| Error::bootstrap(origin(path), e))?;
            if let Some(document) = document {
                match tree.as_mut() {
                    Some(tree) => deep_merge(tree, document),
                    None => tree = Some(document),
                }
            }
        }

        tree.ok_or_else(|| {
            let config_dir = self.settings.config_dir();
            Error::bootstrap(
                origin(&config_dir),
                Error::configuration(format!(
                    "No configuration file found, expected one of: {}",
                    files
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            )
        })
    }

    fn load_documents(&self) -> Result<Vec<(String, ContainerConfiguration)>> {
        let raw: Vec<(String, Value)> = match &self.source {
            ConfigurationSource::Inline { documents, .. } => documents
                .iter()
                .enumerate()
                .map(|(index, document)| (format!("inline document {index}"), document.clone()))
                .collect(),
            ConfigurationSource::Directory => {
                let mut raw = Vec::new();
                for path in ConfigLocator::from_settings(&self.settings).services_files() {
                    let document =
                        read_json_document(&path).map_err(|e| Error::bootstrap(origin(&path), e))?;
                    if let Some(document) = document {
                        raw.push((origin(&path), document));
                    }
                }
                raw
            }
        };

        raw.into_iter()
            .map(|(origin, document)| {
                ContainerConfiguration::from_value(&document)
                    .map(|configuration| (origin.clone(), configuration))
                    .map_err(|e| Error::bootstrap(origin, e))
            })
            .collect()
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("settings", &self.settings)
            .field(
                "modules",
                &self.modules.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("source", &self.source)
            .field("initialized", &self.bootstrapped.get().is_some())
            .finish_non_exhaustive()
    }
}

fn origin(path: &Path) -> String {
    path.display().to_string()
}
