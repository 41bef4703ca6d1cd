//! Service registration
//!
//! Binds declared services: implementation lookup, arity check, argument
//! resolution, singleton binding and alias tags, in declaration order.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wirekit_application::{ImplementationRegistry, normalize_implementation_path};
use wirekit_domain::error::{Error, Result};
use wirekit_domain::value_objects::ServiceDescriptor;

use super::container::ContainerBuilder;
use super::resolver::ReferenceResolver;

/// Registers service descriptors into a container builder
#[derive(Debug)]
pub struct ServiceRegistrar<'a> {
    implementations: &'a ImplementationRegistry,
    resolver: ReferenceResolver<'a>,
    project_dir: Option<PathBuf>,
}

impl<'a> ServiceRegistrar<'a> {
    /// Create a registrar over the given registries
    pub fn new(implementations: &'a ImplementationRegistry, resolver: ReferenceResolver<'a>) -> Self {
        Self {
            implementations,
            resolver,
            project_dir: None,
        }
    }

    /// Strip this directory from implementation paths before lookup
    pub fn with_project_dir(mut self, project_dir: impl AsRef<Path>) -> Self {
        self.project_dir = Some(project_dir.as_ref().to_path_buf());
        self
    }

    /// Register every descriptor, in order
    pub fn register_all(
        &self,
        builder: &mut ContainerBuilder,
        descriptors: &[ServiceDescriptor],
    ) -> Result<()> {
        for descriptor in descriptors {
            self.register(builder, descriptor)?;
        }
        info!(services = descriptors.len(), "Services registered");
        Ok(())
    }

    /// Register one descriptor; a previous binding of the same id is replaced
    pub fn register(&self, builder: &mut ContainerBuilder, descriptor: &ServiceDescriptor) -> Result<()> {
        let path =
            normalize_implementation_path(&descriptor.implementation, self.project_dir.as_deref());
        let implementation = self
            .implementations
            .resolve(&path)
            .ok_or_else(|| Error::implementation_not_found(&path))?;

        if descriptor.arguments.len() > implementation.arity() {
            return Err(Error::configuration(format!(
                "Service \"{}\" declares {} arguments but \"{}\" takes {} ({})",
                descriptor.id,
                descriptor.arguments.len(),
                path,
                implementation.arity(),
                implementation.parameters.join(", ")
            )));
        }

        let dependencies = descriptor
            .arguments
            .iter()
            .map(|raw| self.resolver.resolve_argument(builder, &descriptor.id, raw))
            .collect::<Result<Vec<_>>>()?;

        builder.bind_service(&descriptor.id, implementation.clone(), dependencies);
        for tag in &descriptor.alias {
            builder.tag(tag, &descriptor.id)?;
        }
        debug!(id = %descriptor.id, aliases = descriptor.alias.len(), "Service registered");
        Ok(())
    }
}
