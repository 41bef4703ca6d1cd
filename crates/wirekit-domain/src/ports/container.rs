//! Container Query Port
//!
//! The only surface routing, server adapters and controllers may depend on.
//! Implemented by the frozen container in the infrastructure layer.

use crate::constants::PARAMETERS_ID;
use crate::error::{Error, Result};
use crate::value_objects::Instance;
use serde_json::Value;
use std::any::{Any, type_name};
use std::sync::Arc;

/// Read-only access to a bootstrapped container
pub trait ServiceContainer: Send + Sync {
    /// Resolve one binding; singletons are constructed on first access
    fn get(&self, id: &str) -> Result<Instance>;

    /// Resolve every binding under a tag, in registration order
    fn get_all(&self, tag: &str) -> Result<Vec<Instance>>;

    /// Whether the id is bound, directly or as a tag
    fn is_bound(&self, id: &str) -> bool;
}

/// Typed helpers on top of [`ServiceContainer`]
pub trait ServiceContainerExt: ServiceContainer {
    /// Resolve a constant binding
    fn get_value(&self, id: &str) -> Result<Value> {
        let instance = self.get(id)?;
        instance
            .as_value()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(id, type_name::<Value>(), instance.type_name()))
    }

    /// Resolve a binding holding a `T`
    fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        let instance = self.get(id)?;
        instance
            .downcast::<T>()
            .ok_or_else(|| Error::type_mismatch(id, type_name::<T>(), instance.type_name()))
    }

    /// Resolve every binding under a tag that holds a `T`
    fn get_all_as<T: Any + Send + Sync>(&self, tag: &str) -> Result<Vec<Arc<T>>> {
        self.get_all(tag)?
            .into_iter()
            .map(|instance| {
                instance
                    .downcast::<T>()
                    .ok_or_else(|| Error::type_mismatch(tag, type_name::<T>(), instance.type_name()))
            })
            .collect()
    }

    /// Look up a parameter by name, `None` when it was never declared
    fn parameter(&self, name: &str) -> Result<Option<Value>> {
        if !self.is_bound(PARAMETERS_ID) {
            return Ok(None);
        }
        Ok(self.get_value(PARAMETERS_ID)?.get(name).cloned())
    }
}

impl<C: ServiceContainer + ?Sized> ServiceContainerExt for C {}
