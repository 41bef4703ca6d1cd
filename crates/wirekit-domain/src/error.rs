//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as an attached cause
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for wirekit
///
/// Every variant except [`Error::UnresolvedService`], [`Error::AmbiguousBinding`] and
/// [`Error::Construction`] is raised during bootstrap and aborts it. Those three surface
/// lazily, on first access to a binding.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// A module configuration subtree failed its schema
    #[error("Configuration under \"{namespace}\" does not match its schema: {}", .errors.join("; "))]
    SchemaValidation {
        /// Root namespace of the rejected subtree
        namespace: String,
        /// Validator diagnostics
        errors: Vec<String>,
    },

    /// A schema could not be compiled
    #[error("Invalid schema: {message}")]
    InvalidSchema {
        /// Compiler diagnostic
        message: String,
    },

    /// A `%name%` argument names a parameter that was never declared
    #[error("Injected argument \"{name}\" of service \"{service}\" is not declared as parameter")]
    UnresolvedParameter {
        /// Parameter name as written between the `%` sigils
        name: String,
        /// Service whose argument list references it
        service: String,
    },

    /// A `!name` argument names an external module that cannot be loaded
    #[error("\"{name}\" is not a loadable external module")]
    UnresolvedExternalModule {
        /// External module name
        name: String,
        /// Load failure reported by the module loader
        #[source]
        source: BoxedError,
    },

    /// No injectable implementation is registered under the given path
    #[error("No injectable implementation registered for \"{path}\"")]
    ImplementationNotFound {
        /// Normalized implementation path
        path: String,
    },

    /// An id is bound neither as a service nor as a tag
    #[error("No binding found for service identifier \"{id}\"")]
    UnresolvedService {
        /// The requested identifier
        id: String,
    },

    /// `get` was called on a tag that has several bindings
    #[error("Ambiguous match for service identifier \"{id}\": {count} bindings")]
    AmbiguousBinding {
        /// The requested identifier
        id: String,
        /// Number of bindings found under it
        count: usize,
    },

    /// A binding holds a different type than the caller asked for
    #[error("Service \"{id}\" is a {actual}, not a {expected}")]
    TypeMismatch {
        /// The requested identifier
        id: String,
        /// Type the caller asked for
        expected: &'static str,
        /// Type actually bound
        actual: &'static str,
    },

    /// Services depend on each other in a loop
    #[error("Circular dependency between services: {}", .path.join(" -> "))]
    CircularDependency {
        /// Service ids forming the cycle, first id repeated at the end
        path: Vec<String>,
    },

    /// An implementation factory refused to build an instance
    #[error("Failed to construct \"{id}\": {message}")]
    Construction {
        /// Service id being constructed
        id: String,
        /// Factory diagnostic
        message: String,
    },

    /// The routing configuration is missing or unusable
    #[error("Missing route configuration: {message}")]
    MissingRouteConfig {
        /// What is missing and where
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedError>,
    },

    /// A route references a controller that cannot be resolved
    #[error("Missing controller: {message}")]
    MissingController {
        /// What is missing and where
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedError>,
    },

    /// Bootstrap aborted; `origin` names the file or key at fault
    #[error("Bootstrap failed in {origin}: {source}")]
    Bootstrap {
        /// Configuration file or key that caused the failure
        origin: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create an unresolved parameter error
    pub fn unresolved_parameter<N: Into<String>, S: Into<String>>(name: N, service: S) -> Self {
        Self::UnresolvedParameter {
            name: name.into(),
            service: service.into(),
        }
    }

    /// Create an unresolved external module error
    pub fn unresolved_external_module<N: Into<String>, E: Into<BoxedError>>(
        name: N,
        source: E,
    ) -> Self {
        Self::UnresolvedExternalModule {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create an implementation not found error
    pub fn implementation_not_found<S: Into<String>>(path: S) -> Self {
        Self::ImplementationNotFound { path: path.into() }
    }

    /// Create an unresolved service error
    pub fn unresolved_service<S: Into<String>>(id: S) -> Self {
        Self::UnresolvedService { id: id.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<S: Into<String>>(
        id: S,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            id: id.into(),
            expected,
            actual,
        }
    }

    /// Create a construction error
    pub fn construction<I: Into<String>, S: Into<String>>(id: I, message: S) -> Self {
        Self::Construction {
            id: id.into(),
            message: message.into(),
        }
    }
}

// Schema error creation methods
impl Error {
    /// Create a schema validation error
    pub fn schema_validation<S: Into<String>>(namespace: S, errors: Vec<String>) -> Self {
        Self::SchemaValidation {
            namespace: namespace.into(),
            errors,
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema<S: Into<String>>(message: S) -> Self {
        Self::InvalidSchema {
            message: message.into(),
        }
    }
}

// Routing error creation methods
impl Error {
    /// Create a missing route configuration error
    pub fn missing_route_config<S: Into<String>>(message: S) -> Self {
        Self::MissingRouteConfig {
            message: message.into(),
            source: None,
        }
    }

    /// Create a missing route configuration error with source
    pub fn missing_route_config_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::MissingRouteConfig {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing controller error
    pub fn missing_controller<S: Into<String>>(message: S) -> Self {
        Self::MissingController {
            message: message.into(),
        }
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap an error with the configuration file or key that caused it
    pub fn bootstrap<S: Into<String>>(origin: S, source: Error) -> Self {
        Self::Bootstrap {
            origin: origin.into(),
            source: Box::new(source),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Innermost error, looking through `Bootstrap` wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::Bootstrap { source, .. } => source.root(),
            other => other,
        }
    }
}
