//! Configuration module contract

use serde_json::Value;
use wirekit_domain::error::Result;

use crate::di::container::ContainerBuilder;

/// A unit of configuration owning one root namespace of the configuration tree
///
/// The module registry validates the namespace subtree against [`ConfigModule::schema`]
/// and only then hands it to [`ConfigModule::process_config`].
pub trait ConfigModule: Send + Sync {
    /// Module name, used in logs and state reports
    fn name(&self) -> &str;

    /// Root key of the configuration tree owned by this module
    fn root_namespace(&self) -> &str;

    /// JSON Schema the subtree must satisfy
    fn schema(&self) -> Value;

    /// Map the validated subtree into container bindings
    fn process_config(&self, builder: &mut ContainerBuilder, subtree: &Value) -> Result<()>;
}
