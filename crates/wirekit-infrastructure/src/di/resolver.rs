//! Reference resolution
//!
//! Turns classified constructor arguments into [`Dependency`] entries, checking
//! what can be checked while the container is still being built.

use serde_json::Value;
use tracing::{debug, error};
use wirekit_application::ExternalModuleRegistry;
use wirekit_domain::error::{Error, Result};
use wirekit_domain::value_objects::ArgumentToken;

use super::container::{ContainerBuilder, Dependency};

/// Resolves argument tokens against a container under construction
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    externals: &'a ExternalModuleRegistry,
}

impl<'a> ReferenceResolver<'a> {
    /// Create a resolver loading `!module` references from `externals`
    pub fn new(externals: &'a ExternalModuleRegistry) -> Self {
        Self { externals }
    }

    /// Classify and resolve one raw argument of `service`
    pub fn resolve_argument(
        &self,
        builder: &mut ContainerBuilder,
        service: &str,
        raw: &Value,
    ) -> Result<Dependency> {
        self.resolve(builder, service, ArgumentToken::classify(raw))
    }

    /// Resolve one token of `service`
    ///
    /// - Service references are checked when first constructed.
    /// - Parameter references must name a declared parameter.
    /// - External references must be loadable. Each module is loaded once and
    ///   bound under its name unless that id is taken.
    /// - JSON object literals are bound under their own text and injected from there.
    pub fn resolve(
        &self,
        builder: &mut ContainerBuilder,
        service: &str,
        token: ArgumentToken,
    ) -> Result<Dependency> {
        if let Some((text, object)) = token.json_object_literal() {
            if !builder.contains(text) {
                debug!(service, "Binding JSON literal argument");
                builder.bind_constant(text, Value::Object(object));
            }
            return Ok(Dependency::Constant(text.to_owned()));
        }

        match token {
            ArgumentToken::ServiceRef(id) => Ok(Dependency::Service(id)),
            ArgumentToken::ParameterRef(name) => {
                if builder.has_parameter(&name) {
                    Ok(Dependency::Parameter(name))
                } else {
                    Err(Error::unresolved_parameter(name, service))
                }
            }
            ArgumentToken::ExternalRef(name) => {
                if !builder.has_external(&name) {
                    let module = self.externals.load(&name).map_err(|e| {
                        error!(module = %name, service, error = %e, "Failed to load external module");
                        Error::unresolved_external_module(&name, e)
                    })?;
                    debug!(module = %name, "External module loaded");
                    builder.bind_external(&name, module);
                }
                Ok(Dependency::External(name))
            }
            ArgumentToken::Literal(value) => Ok(Dependency::Value(value)),
        }
    }
}
