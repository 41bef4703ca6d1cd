//! Type-erased container instances

use serde_json::Value;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// A shared, type-erased value handed out by the container
///
/// Constants are instances wrapping a [`serde_json::Value`]. Services hold whatever
/// their factory produced; trait objects are stored as `Arc<dyn Trait>` so consumers
/// can downcast to that exact type.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use wirekit_domain::value_objects::Instance;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// let instance = Instance::new::<Arc<dyn Greeter>>(Arc::new(English));
/// let greeter = instance.downcast_ref::<Arc<dyn Greeter>>().unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// ```
#[derive(Clone)]
pub struct Instance {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Instance {
    /// Wrap a value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wrap an already shared value without re-allocating
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: type_name::<T>(),
        }
    }

    /// Wrap a constant configuration value
    pub fn constant(value: Value) -> Self {
        Self::new(value)
    }

    /// Borrow the wrapped value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Share the wrapped value as `Arc<T>`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    /// Borrow the wrapped value when it is a constant
    pub fn as_value(&self) -> Option<&Value> {
        self.downcast_ref::<Value>()
    }

    /// Name of the wrapped type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles point at the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner).cast::<()>(),
            Arc::as_ptr(&other.inner).cast::<()>(),
        )
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_value() {
            Some(value) => f.debug_tuple("Instance").field(value).finish(),
            None => f.debug_tuple("Instance").field(&self.type_name).finish(),
        }
    }
}
