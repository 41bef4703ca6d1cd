//! Implementation Registry
//!
//! Injectable implementations keyed by module path. Each entry declares its
//! constructor parameter list up front, which is what makes it injectable.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use wirekit_domain::value_objects::Instance;

use super::arguments::InjectedArguments;

/// Factory building one instance from its injected arguments
pub type Factory = Arc<dyn Fn(&InjectedArguments) -> Result<Instance, String> + Send + Sync>;

/// Compile-time registry entry for an injectable implementation
///
/// Each implementation registers itself with this entry using
/// `#[linkme::distributed_slice(IMPLEMENTATIONS)]`.
pub struct ImplementationEntry {
    /// Module path, relative to the project root (e.g. "app/components/server/server")
    pub path: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Constructor parameter names, by position
    pub parameters: &'static [&'static str],
    /// Factory function creating the instance
    pub factory: fn(&InjectedArguments) -> Result<Instance, String>,
}

// Auto-collection via linkme distributed slices - implementations submit entries at compile time
#[linkme::distributed_slice]
pub static IMPLEMENTATIONS: [ImplementationEntry] = [..];

/// An injectable implementation known to a registry
#[derive(Clone)]
pub struct Implementation {
    /// Normalized module path
    pub path: String,
    /// Human-readable description
    pub description: String,
    /// Constructor parameter names, by position
    pub parameters: Vec<String>,
    factory: Factory,
}

impl Implementation {
    /// Create an implementation from a factory closure
    pub fn new<F>(path: &str, parameters: &[&str], factory: F) -> Self
    where
        F: Fn(&InjectedArguments) -> Result<Instance, String> + Send + Sync + 'static,
    {
        Self {
            path: normalize_implementation_path(path, None),
            description: String::new(),
            parameters: parameters.iter().map(|p| (*p).to_owned()).collect(),
            factory: Arc::new(factory),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Number of declared constructor parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Build an instance
    pub fn construct(&self, arguments: &InjectedArguments) -> Result<Instance, String> {
        (self.factory)(arguments)
    }
}

impl From<&ImplementationEntry> for Implementation {
    fn from(entry: &ImplementationEntry) -> Self {
        Self {
            path: normalize_implementation_path(entry.path, None),
            description: entry.description.to_owned(),
            parameters: entry.parameters.iter().map(|p| (*p).to_owned()).collect(),
            factory: Arc::new(entry.factory),
        }
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("path", &self.path)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Lookup table of injectable implementations
///
/// Seeded from [`IMPLEMENTATIONS`] with [`ImplementationRegistry::from_linked`];
/// programmatic registrations overwrite linked entries with the same path.
#[derive(Debug, Clone, Default)]
pub struct ImplementationRegistry {
    entries: HashMap<String, Implementation>,
    order: Vec<String>,
}

impl ImplementationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every linked [`ImplementationEntry`]
    pub fn from_linked() -> Self {
        let mut registry = Self::new();
        for entry in IMPLEMENTATIONS {
            registry.insert(Implementation::from(entry));
        }
        registry
    }

    /// Register an implementation, replacing any previous one with the same path
    pub fn insert(&mut self, implementation: Implementation) -> &mut Self {
        if !self.entries.contains_key(&implementation.path) {
            self.order.push(implementation.path.clone());
        }
        self.entries
            .insert(implementation.path.clone(), implementation);
        self
    }

    /// Register a factory closure
    pub fn register<F>(&mut self, path: &str, parameters: &[&str], factory: F) -> &mut Self
    where
        F: Fn(&InjectedArguments) -> Result<Instance, String> + Send + Sync + 'static,
    {
        self.insert(Implementation::new(path, parameters, factory))
    }

    /// Builder form of [`ImplementationRegistry::register`]
    pub fn with<F>(mut self, path: &str, parameters: &[&str], factory: F) -> Self
    where
        F: Fn(&InjectedArguments) -> Result<Instance, String> + Send + Sync + 'static,
    {
        self.register(path, parameters, factory);
        self
    }

    /// Find the implementation registered under an already normalized path
    pub fn resolve(&self, path: &str) -> Option<&Implementation> {
        self.entries.get(path)
    }

    /// Whether an implementation is registered under the path
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// All registered (path, description) pairs in registration order
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.order
            .iter()
            .filter_map(|path| self.entries.get(path))
            .map(|i| (i.path.as_str(), i.description.as_str()))
            .collect()
    }

    /// Number of registered implementations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a module path relative to the project root
///
/// Strips the project directory prefix (when given), a leading `./` and leading
/// slashes, and converts backslashes to forward slashes.
pub fn normalize_implementation_path(path: &str, project_dir: Option<&Path>) -> String {
    let mut normalized = path.replace('\\', "/");

    if let Some(project_dir) = project_dir {
        let prefix = project_dir.to_string_lossy().replace('\\', "/");
        let prefix = prefix.trim_end_matches('/');
        if !prefix.is_empty() {
            if let Some(rest) = normalized.strip_prefix(prefix) {
                if rest.is_empty() || rest.starts_with('/') {
                    normalized = rest.to_owned();
                }
            }
        }
    }

    let mut trimmed = normalized.as_str();
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            break;
        }
    }
    trimmed.to_owned()
}
