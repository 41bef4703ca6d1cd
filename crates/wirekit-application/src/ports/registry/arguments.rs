//! Positional constructor arguments handed to implementation factories

use serde_json::Value;
use std::any::{Any, type_name};
use std::sync::Arc;
use wirekit_domain::ports::ServiceContainer;
use wirekit_domain::value_objects::Instance;

/// Resolved dependencies for one constructor call, by position
///
/// Accessors return `Err(String)` so factories can use `?` directly.
#[derive(Debug, Clone)]
pub struct InjectedArguments {
    service: String,
    values: Vec<Instance>,
}

impl InjectedArguments {
    /// Bundle resolved arguments for `service`
    pub fn new(service: impl Into<String>, values: Vec<Instance>) -> Self {
        Self {
            service: service.into(),
            values,
        }
    }

    /// Id of the service being constructed
    pub fn service_id(&self) -> &str {
        &self.service
    }

    /// Number of injected arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no argument was injected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument at `index`
    pub fn instance(&self, index: usize) -> Result<&Instance, String> {
        self.values.get(index).ok_or_else(|| {
            format!(
                "missing constructor argument {index} for \"{}\" ({} injected)",
                self.service,
                self.values.len()
            )
        })
    }

    /// Argument at `index` as a constant value
    pub fn value(&self, index: usize) -> Result<&Value, String> {
        let instance = self.instance(index)?;
        instance.as_value().ok_or_else(|| {
            format!(
                "argument {index} of \"{}\" is a {}, not a constant",
                self.service,
                instance.type_name()
            )
        })
    }

    /// Argument at `index` as a string constant
    pub fn str(&self, index: usize) -> Result<&str, String> {
        self.value(index)?.as_str().ok_or_else(|| {
            format!("argument {index} of \"{}\" is not a string", self.service)
        })
    }

    /// Argument at `index` borrowed as `T`
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, String> {
        let instance = self.instance(index)?;
        instance.downcast_ref::<T>().ok_or_else(|| {
            format!(
                "argument {index} of \"{}\" is a {}, not a {}",
                self.service,
                instance.type_name(),
                type_name::<T>()
            )
        })
    }

    /// Argument at `index` shared as `Arc<T>`
    pub fn shared<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, String> {
        let instance = self.instance(index)?;
        instance.downcast::<T>().ok_or_else(|| {
            format!(
                "argument {index} of \"{}\" is a {}, not a {}",
                self.service,
                instance.type_name(),
                type_name::<T>()
            )
        })
    }

    /// Argument at `index` as the container itself (`@container`)
    pub fn container(&self, index: usize) -> Result<Arc<dyn ServiceContainer>, String> {
        self.get::<Arc<dyn ServiceContainer>>(index).cloned()
    }
}
