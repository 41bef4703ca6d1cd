//! In-memory container double for use case tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use wirekit_domain::error::{Error, Result};
use wirekit_domain::ports::{RouterAdapter, ServerAdapter, ServiceContainer};
use wirekit_domain::value_objects::{Instance, ResolvedRoute};

/// Map-backed container; tags are plain instance lists
#[derive(Default)]
pub struct MapContainer {
    bindings: HashMap<String, Instance>,
    tags: HashMap<String, Vec<Instance>>,
}

impl MapContainer {
    pub fn bind(mut self, id: &str, instance: Instance) -> Self {
        self.bindings.insert(id.to_owned(), instance);
        self
    }

    pub fn tag(mut self, tag: &str, instance: Instance) -> Self {
        self.tags.entry(tag.to_owned()).or_default().push(instance);
        self
    }
}

impl ServiceContainer for MapContainer {
    fn get(&self, id: &str) -> Result<Instance> {
        self.bindings
            .get(id)
            .cloned()
            .ok_or_else(|| Error::unresolved_service(id))
    }

    fn get_all(&self, tag: &str) -> Result<Vec<Instance>> {
        self.tags
            .get(tag)
            .cloned()
            .ok_or_else(|| Error::unresolved_service(tag))
    }

    fn is_bound(&self, id: &str) -> bool {
        self.bindings.contains_key(id) || self.tags.contains_key(id)
    }
}

/// Router recording the routes registered on it
pub struct RecordingRouter {
    pub kind: &'static str,
    pub routes: Mutex<Vec<ResolvedRoute>>,
}

impl RecordingRouter {
    pub fn new(kind: &'static str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            routes: Mutex::new(Vec::new()),
        })
    }
}

impl RouterAdapter for RecordingRouter {
    fn name(&self) -> &str {
        self.kind
    }

    fn matches(&self, router_type: &str) -> bool {
        router_type == self.kind
    }

    fn register_route(&self, route: &ResolvedRoute, _controller: Instance) -> Result<()> {
        self.routes.lock().unwrap().push(route.clone());
        Ok(())
    }
}

/// Server recording which router it was booted with
pub struct RecordingServer {
    pub kind: &'static str,
    pub booted_with: Mutex<Option<String>>,
}

impl RecordingServer {
    pub fn new(kind: &'static str) -> Arc<Self> {
        Arc::new(Self {
            kind,
            booted_with: Mutex::new(None),
        })
    }
}

impl ServerAdapter for RecordingServer {
    fn name(&self) -> &str {
        self.kind
    }

    fn supports(&self, server_type: &str) -> bool {
        server_type == self.kind
    }

    fn boot(&self, router: &dyn RouterAdapter, _options: &serde_json::Value) -> Result<()> {
        *self.booted_with.lock().unwrap() = Some(router.name().to_owned());
        Ok(())
    }
}

pub fn router_instance(router: &Arc<RecordingRouter>) -> Instance {
    let router: Arc<dyn RouterAdapter> = router.clone();
    Instance::new(router)
}

pub fn server_instance(server: &Arc<RecordingServer>) -> Instance {
    let server: Arc<dyn ServerAdapter> = server.clone();
    Instance::new(server)
}
