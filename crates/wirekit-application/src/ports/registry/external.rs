//! External Module Registry
//!
//! Modules referenced from service arguments with the `!name` sigil. A module is
//! anything that can be loaded on demand: a shared client, a function table, a
//! constant object.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use wirekit_domain::value_objects::Instance;

/// Loader producing the module instance
pub type Loader = Arc<dyn Fn() -> Result<Instance, String> + Send + Sync>;

/// Compile-time registry entry for an external module
pub struct ExternalModuleEntry {
    /// Module name as written after the `!` sigil
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Loader function
    pub loader: fn() -> Result<Instance, String>,
}

// Auto-collection via linkme distributed slices - modules submit entries at compile time
#[linkme::distributed_slice]
pub static EXTERNAL_MODULES: [ExternalModuleEntry] = [..];

/// Lookup table of loadable external modules
#[derive(Clone, Default)]
pub struct ExternalModuleRegistry {
    loaders: HashMap<String, (String, Loader)>,
}

impl ExternalModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every linked [`ExternalModuleEntry`]
    pub fn from_linked() -> Self {
        let mut registry = Self::new();
        for entry in EXTERNAL_MODULES {
            let loader: Loader = Arc::new(entry.loader);
            registry.loaders.insert(
                entry.name.to_owned(),
                (entry.description.to_owned(), loader),
            );
        }
        registry
    }

    /// Register a loader, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: &str, loader: F) -> &mut Self
    where
        F: Fn() -> Result<Instance, String> + Send + Sync + 'static,
    {
        let loader: Loader = Arc::new(loader);
        self.loaders
            .insert(name.to_owned(), (String::new(), loader));
        self
    }

    /// Builder form of [`ExternalModuleRegistry::register`]
    pub fn with<F>(mut self, name: &str, loader: F) -> Self
    where
        F: Fn() -> Result<Instance, String> + Send + Sync + 'static,
    {
        self.register(name, loader);
        self
    }

    /// Load a module by name
    pub fn load(&self, name: &str) -> Result<Instance, String> {
        match self.loaders.get(name) {
            Some((_, loader)) => loader(),
            None => {
                let mut available: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
                available.sort_unstable();
                Err(format!(
                    "Cannot find module '{name}'. Available modules: {available:?}"
                ))
            }
        }
    }

    /// Whether a loader is registered under the name
    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// All registered (name, description) pairs, sorted by name
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut modules: Vec<(&str, &str)> = self
            .loaders
            .iter()
            .map(|(name, (description, _))| (name.as_str(), description.as_str()))
            .collect();
        modules.sort_unstable();
        modules
    }
}

impl fmt::Debug for ExternalModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalModuleRegistry")
            .field("modules", &self.list())
            .finish()
    }
}
