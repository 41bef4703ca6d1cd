//! Service Container
//!
//! Two phases. A [`ContainerBuilder`] collects bindings while configuration is
//! processed; [`ContainerBuilder::build`] checks the dependency graph and freezes
//! it into a [`Container`] that can no longer be rebound.
//!
//! Every binding is a singleton. Each one owns a `OnceCell`, so concurrent first
//! resolution constructs the instance exactly once, and cycles are rejected at
//! build time so a first construction cannot wait on itself.
//!
//! ```text
//! ContainerBuilder ──bind/tag──▶ slots ──build()──▶ Arc<Container>
//!                                  │                   │
//!                                  └── OnceCell ◀──get()┘
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use tracing::{debug, info};
use wirekit_application::{Implementation, InjectedArguments};
use wirekit_domain::constants::{CONTAINER_ID, PARAMETERS_ID};
use wirekit_domain::error::{Error, Result};
use wirekit_domain::ports::ServiceContainer;
use wirekit_domain::value_objects::Instance;

/// How one positional constructor argument is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum Dependency {
    /// Another binding, resolved on first construction
    Service(String),
    /// A declared parameter
    Parameter(String),
    /// A loaded external module
    External(String),
    /// A constant bound under its own literal text
    Constant(String),
    /// A literal injected as is
    Value(Value),
}

impl Dependency {
    /// Binding id this dependency reads, if any
    pub fn binding_id(&self) -> Option<&str> {
        match self {
            Self::Service(id) | Self::Parameter(id) | Self::External(id) | Self::Constant(id) => {
                Some(id)
            }
            Self::Value(_) => None,
        }
    }
}

/// What a binding produces
#[derive(Debug, Clone)]
pub enum Binding {
    /// A ready value
    Constant(Instance),
    /// An implementation constructed from its dependencies
    Service {
        /// Implementation building the instance
        implementation: Implementation,
        /// Positional constructor arguments
        dependencies: Vec<Dependency>,
    },
}

/// Describes one binding without resolving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSummary {
    /// Binding id
    pub id: String,
    /// Implementation path for services, `None` for constants
    pub implementation: Option<String>,
    /// Tags the binding is listed under
    pub tags: Vec<String>,
}

struct Slot {
    id: String,
    binding: Binding,
    cell: OnceCell<Instance>,
}

impl Slot {
    fn new(id: &str, binding: Binding) -> Arc<Self> {
        let cell = match &binding {
            Binding::Constant(instance) => OnceCell::with_value(instance.clone()),
            Binding::Service { .. } => OnceCell::new(),
        };
        Arc::new(Self {
            id: id.to_owned(),
            binding,
            cell,
        })
    }

    fn dependencies(&self) -> &[Dependency] {
        match &self.binding {
            Binding::Service { dependencies, .. } => dependencies,
            Binding::Constant(_) => &[],
        }
    }

    fn key(self: &Arc<Self>) -> usize {
        Arc::as_ptr(self) as usize
    }
}

/// Mutable build phase of a container
#[derive(Default)]
pub struct ContainerBuilder {
    slots: HashMap<String, Arc<Slot>>,
    order: Vec<String>,
    tags: HashMap<String, Vec<Arc<Slot>>>,
    parameters: Map<String, Value>,
    externals: HashSet<String>,
}

impl ContainerBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a constant value, replacing any previous binding of the id
    pub fn bind_constant(&mut self, id: &str, value: Value) -> &mut Self {
        self.bind_instance(id, Instance::constant(value))
    }

    /// Bind a ready instance, replacing any previous binding of the id
    pub fn bind_instance(&mut self, id: &str, instance: Instance) -> &mut Self {
        self.insert(id, Binding::Constant(instance));
        self
    }

    /// Bind a singleton service, replacing any previous binding of the id
    pub fn bind_service(
        &mut self,
        id: &str,
        implementation: Implementation,
        dependencies: Vec<Dependency>,
    ) -> &mut Self {
        debug!(
            id,
            implementation = %implementation.path,
            arguments = dependencies.len(),
            "Binding service"
        );
        self.insert(
            id,
            Binding::Service {
                implementation,
                dependencies,
            },
        );
        self
    }

    /// List the current binding of `id` under `tag` as well
    ///
    /// The tag shares the binding's singleton; entries accumulate in call order.
    pub fn tag(&mut self, tag: &str, id: &str) -> Result<&mut Self> {
        let slot = self
            .slots
            .get(id)
            .cloned()
            .ok_or_else(|| Error::unresolved_service(id))?;
        debug!(tag, id, "Tagging binding");
        self.tags.entry(tag.to_owned()).or_default().push(slot);
        Ok(self)
    }

    /// Merge parameters into the accumulated `parameters` map
    ///
    /// Every key is also bound as an individual constant. Later keys overwrite
    /// earlier ones.
    pub fn merge_parameters(&mut self, parameters: Map<String, Value>) -> &mut Self {
        for (key, value) in parameters {
            debug!(key = %key, "Binding parameter");
            self.bind_constant(&key, value.clone());
            self.parameters.insert(key, value);
        }
        let accumulated = Value::Object(self.parameters.clone());
        self.bind_constant(PARAMETERS_ID, accumulated)
    }

    /// Record a loaded external module and bind it under its name
    ///
    /// An id that is already bound keeps its binding.
    pub fn bind_external(&mut self, name: &str, module: Instance) -> &mut Self {
        self.externals.insert(name.to_owned());
        if self.contains(name) {
            debug!(module = name, "External module name already bound, keeping binding");
        } else {
            self.bind_instance(name, module);
        }
        self
    }

    /// Whether the external module was loaded already
    pub fn has_external(&self, name: &str) -> bool {
        self.externals.contains(name)
    }

    /// Whether a parameter was declared; `null` values count as declared
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Accumulated parameters
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Whether the id has a direct binding
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Whether the id is bound directly or as a tag
    pub fn is_bound(&self, id: &str) -> bool {
        self.contains(id) || self.tags.contains_key(id)
    }

    /// Number of direct bindings
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check the dependency graph and freeze the container
    pub fn build(self) -> Result<Arc<Container>> {
        self.check_cycles()?;

        let Self {
            slots,
            order,
            tags,
            parameters: _,
            externals: _,
        } = self;
        info!(
            bindings = slots.len(),
            tags = tags.len(),
            "Container frozen"
        );
        Ok(Arc::new_cyclic(|this| Container {
            slots,
            order,
            tags,
            this: this.clone(),
        }))
    }

    fn insert(&mut self, id: &str, binding: Binding) {
        if self.slots.insert(id.to_owned(), Slot::new(id, binding)).is_some() {
            debug!(id, "Overwriting binding");
        } else {
            self.order.push(id.to_owned());
        }
    }

    fn targets(&self, id: &str) -> Vec<Arc<Slot>> {
        match self.slots.get(id) {
            Some(slot) => vec![slot.clone()],
            None => self.tags.get(id).cloned().unwrap_or_default(),
        }
    }

    fn check_cycles(&self) -> Result<()> {
        let mut done = HashSet::new();
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        for id in &self.order {
            if let Some(slot) = self.slots.get(id) {
                self.visit(slot, &mut path, &mut on_path, &mut done)?;
            }
        }
        for slots in self.tags.values() {
            for slot in slots {
                self.visit(slot, &mut path, &mut on_path, &mut done)?;
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        slot: &Arc<Slot>,
        path: &mut Vec<String>,
        on_path: &mut HashSet<usize>,
        done: &mut HashSet<usize>,
    ) -> Result<()> {
        let key = slot.key();
        if done.contains(&key) {
            return Ok(());
        }
        if on_path.contains(&key) {
            let start = path.iter().position(|id| id == &slot.id).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(slot.id.clone());
            return Err(Error::CircularDependency { path: cycle });
        }

        path.push(slot.id.clone());
        on_path.insert(key);
        for dependency in slot.dependencies() {
            if let Some(id) = dependency.binding_id() {
                for target in self.targets(id) {
                    self.visit(&target, path, on_path, done)?;
                }
            }
        }
        on_path.remove(&key);
        path.pop();
        done.insert(key);
        Ok(())
    }
}

impl fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("bindings", &self.order)
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A frozen container
///
/// Always handled through `Arc<Container>`; resolving `container` yields that
/// same handle as an `Arc<dyn ServiceContainer>`.
pub struct Container {
    slots: HashMap<String, Arc<Slot>>,
    order: Vec<String>,
    tags: HashMap<String, Vec<Arc<Slot>>>,
    this: Weak<Container>,
}

impl Container {
    /// Construct every service now instead of on first access
    pub fn preload(&self) -> Result<usize> {
        let mut constructed = 0;
        for id in &self.order {
            if let Some(slot) = self.slots.get(id) {
                if matches!(slot.binding, Binding::Service { .. }) {
                    self.resolve(slot)?;
                    constructed += 1;
                }
            }
        }
        info!(services = constructed, "Singletons constructed eagerly");
        Ok(constructed)
    }

    /// Direct bindings in registration order
    pub fn bindings(&self) -> Vec<BindingSummary> {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id))
            .map(|slot| BindingSummary {
                id: slot.id.clone(),
                implementation: match &slot.binding {
                    Binding::Service { implementation, .. } => Some(implementation.path.clone()),
                    Binding::Constant(_) => None,
                },
                tags: self.tags_of(slot),
            })
            .collect()
    }

    /// Ids listed under a tag, in tagging order
    pub fn tagged_ids(&self, tag: &str) -> Vec<&str> {
        self.tags
            .get(tag)
            .map(|slots| slots.iter().map(|s| s.id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Whether the singleton of `id` was constructed already
    pub fn is_constructed(&self, id: &str) -> bool {
        self.slots
            .get(id)
            .is_some_and(|slot| slot.cell.get().is_some())
    }

    fn tags_of(&self, slot: &Arc<Slot>) -> Vec<String> {
        let mut tags: Vec<String> = self
            .tags
            .iter()
            .filter(|(_, slots)| slots.iter().any(|s| Arc::ptr_eq(s, slot)))
            .map(|(tag, _)| tag.clone())
            .collect();
        tags.sort_unstable();
        tags
    }

    fn handle(&self) -> Result<Instance> {
        let this: Arc<dyn ServiceContainer> = self
            .this
            .upgrade()
            .ok_or_else(|| Error::internal("container handle dropped"))?;
        Ok(Instance::new(this))
    }

    fn resolve(&self, slot: &Slot) -> Result<Instance> {
        slot.cell
            .get_or_try_init(|| self.construct(slot))
            .cloned()
    }

    fn construct(&self, slot: &Slot) -> Result<Instance> {
        let Binding::Service {
            implementation,
            dependencies,
        } = &slot.binding
        else {
            return Err(Error::internal(format!(
                "constant \"{}\" has no value",
                slot.id
            )));
        };

        let values = dependencies
            .iter()
            .map(|dependency| match dependency {
                Dependency::Value(value) => Ok(Instance::constant(value.clone())),
                Dependency::Service(id)
                | Dependency::Parameter(id)
                | Dependency::External(id)
                | Dependency::Constant(id) => self.get(id),
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(id = %slot.id, implementation = %implementation.path, "Constructing service");
        implementation
            .construct(&InjectedArguments::new(&slot.id, values))
            .map_err(|message| Error::construction(&slot.id, message))
    }
}

impl ServiceContainer for Container {
    fn get(&self, id: &str) -> Result<Instance> {
        if let Some(slot) = self.slots.get(id) {
            return self.resolve(slot);
        }
        if id == CONTAINER_ID {
            return self.handle();
        }
        match self.tags.get(id).map(Vec::as_slice) {
            Some([slot]) => self.resolve(slot),
            Some(slots) => Err(Error::AmbiguousBinding {
                id: id.to_owned(),
                count: slots.len(),
            }),
            None => Err(Error::unresolved_service(id)),
        }
    }

    fn get_all(&self, tag: &str) -> Result<Vec<Instance>> {
        if let Some(slots) = self.tags.get(tag) {
            return slots.iter().map(|slot| self.resolve(slot)).collect();
        }
        if self.slots.contains_key(tag) || tag == CONTAINER_ID {
            return Ok(vec![self.get(tag)?]);
        }
        Err(Error::unresolved_service(tag))
    }

    fn is_bound(&self, id: &str) -> bool {
        id == CONTAINER_ID || self.slots.contains_key(id) || self.tags.contains_key(id)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.order)
            .field("tags", &self.tags.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
