//! Service descriptors and container configuration documents

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative record describing how to construct and bind one service
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wirekit_domain::value_objects::ServiceDescriptor;
///
/// let descriptor = ServiceDescriptor::new("app/components/routing/router")
///     .with_argument(json!("@container"))
///     .with_argument(json!("%app_router_type%"))
///     .with_alias("routing");
///
/// assert_eq!(descriptor.implementation, "app/components/routing/router");
/// assert_eq!(descriptor.arguments.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Binding id, unique within one loaded configuration
    pub id: String,

    /// Module path of the implementation, relative to the project root
    pub implementation: String,

    /// Raw constructor arguments, classified at registration
    pub arguments: Vec<Value>,

    /// Additional tags the service is bound under
    pub alias: Vec<String>,
}

impl ServiceDescriptor {
    /// Create a descriptor whose implementation path is its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            implementation: id.clone(),
            id,
            arguments: Vec::new(),
            alias: Vec::new(),
        }
    }

    /// Set the implementation path
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }

    /// Append one constructor argument
    pub fn with_argument(mut self, argument: Value) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Replace the constructor arguments
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Append one alias tag
    pub fn with_alias(mut self, tag: impl Into<String>) -> Self {
        self.alias.push(tag.into());
        self
    }

    /// Build a descriptor from one entry of a `services` object
    pub fn from_entry(id: &str, entry: &Value) -> Result<Self> {
        let entry: ServiceEntry = match entry {
            Value::Null => ServiceEntry::default(),
            other => serde_json::from_value(other.clone()).map_err(|e| {
                Error::configuration_with_source(format!("Invalid service \"{id}\""), e)
            })?,
        };

        Ok(Self {
            id: id.to_owned(),
            implementation: entry.class.unwrap_or_else(|| id.to_owned()),
            arguments: entry.arguments,
            alias: entry.alias,
        })
    }
}

/// Shape of a service entry in a container configuration document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceEntry {
    /// Implementation path, defaults to the service id
    #[serde(default)]
    class: Option<String>,

    #[serde(default)]
    arguments: Vec<Value>,

    #[serde(default)]
    alias: Vec<String>,
}

/// A container configuration document
///
/// Declares free-form `parameters` and `services` keyed by id, for direct container
/// wiring outside the module system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerConfiguration {
    /// Nested parameter tree, flattened at registration
    pub parameters: Map<String, Value>,

    /// Service descriptors in declaration order
    pub services: Vec<ServiceDescriptor>,
}

impl ContainerConfiguration {
    /// Parse a container configuration document
    pub fn from_value(document: &Value) -> Result<Self> {
        let Value::Object(root) = document else {
            return Err(Error::configuration(
                "Container configuration must be a JSON object",
            ));
        };

        let parameters = match root.get("parameters") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(parameters)) => parameters.clone(),
            Some(_) => {
                return Err(Error::configuration(
                    "\"parameters\" must be a JSON object",
                ));
            }
        };

        let services = match root.get("services") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(services)) => services
                .iter()
                .map(|(id, entry)| ServiceDescriptor::from_entry(id, entry))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(Error::configuration("\"services\" must be a JSON object"));
            }
        };

        Ok(Self {
            parameters,
            services,
        })
    }

    /// Whether the document declares nothing
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.services.is_empty()
    }
}
