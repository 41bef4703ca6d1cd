//! Module registry
//!
//! Runs configuration modules in a fixed order. Each module moves through
//! `Unregistered → Validated → Processed`, or to `Skipped` when its root namespace
//! is absent. A module failing validation is never partially applied.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use wirekit_domain::error::{Error, Result};

use super::traits::ConfigModule;
use crate::config::schema::SchemaValidator;
use crate::di::container::ContainerBuilder;

/// Lifecycle state of one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleState {
    /// Not run yet
    Unregistered,
    /// Subtree satisfied the schema
    Validated,
    /// Subtree mapped into the container
    Processed,
    /// Root namespace absent from the configuration tree
    Skipped,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            Self::Unregistered => "unregistered",
            Self::Validated => "validated",
            Self::Processed => "processed",
            Self::Skipped => "skipped",
        };
        f.write_str(state)
    }
}

/// Ordered set of configuration modules
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<(Arc<dyn ConfigModule>, ModuleState)>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module; modules run in insertion order
    pub fn add(&mut self, module: Arc<dyn ConfigModule>) -> &mut Self {
        self.modules.push((module, ModuleState::Unregistered));
        self
    }

    /// Builder form of [`ModuleRegistry::add`]
    pub fn with(mut self, module: Arc<dyn ConfigModule>) -> Self {
        self.add(module);
        self
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module is registered
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Validate and process every module against the configuration tree
    ///
    /// Failures are wrapped in [`Error::Bootstrap`] naming the module's root namespace.
    pub fn process_all(&mut self, builder: &mut ContainerBuilder, tree: &Value) -> Result<()> {
        for (module, state) in &mut self.modules {
            Self::process(module.as_ref(), state, builder, tree)?;
        }
        info!(modules = self.modules.len(), "Modules processed");
        Ok(())
    }

    /// Final state of each module, by name
    pub fn states(&self) -> Vec<(String, ModuleState)> {
        self.modules
            .iter()
            .map(|(module, state)| (module.name().to_owned(), *state))
            .collect()
    }

    /// State of the module with the given name
    pub fn state(&self, name: &str) -> Option<ModuleState> {
        self.modules
            .iter()
            .find(|(module, _)| module.name() == name)
            .map(|(_, state)| *state)
    }

    fn process(
        module: &dyn ConfigModule,
        state: &mut ModuleState,
        builder: &mut ContainerBuilder,
        tree: &Value,
    ) -> Result<()> {
        let namespace = module.root_namespace();
        let Some(subtree) = tree.get(namespace) else {
            debug!(module = module.name(), namespace, "Root namespace absent, skipping module");
            *state = ModuleState::Skipped;
            return Ok(());
        };

        SchemaValidator::compile(&module.schema())
            .and_then(|validator| validator.validate(subtree).into_result(namespace))
            .map_err(|e| Error::bootstrap(namespace, e))?;
        *state = ModuleState::Validated;
        debug!(module = module.name(), "Module configuration validated");

        module
            .process_config(builder, subtree)
            .map_err(|e| Error::bootstrap(namespace, e))?;
        *state = ModuleState::Processed;
        debug!(module = module.name(), "Module configuration processed");
        Ok(())
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("states", &self.states())
            .finish()
    }
}
