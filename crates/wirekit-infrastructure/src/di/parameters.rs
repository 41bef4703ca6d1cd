//! Parameter flattening
//!
//! Turns a configuration subtree into flat `prefix_path_to_leaf` keys, depth-first
//! in declaration order. Arrays contribute their index as a path segment.

use serde_json::{Map, Value};
use wirekit_domain::constants::MODULE_PARAMETER_SEPARATOR;

use super::container::ContainerBuilder;

/// Flatten a subtree, joining segments with `_`
///
/// ```
/// use serde_json::json;
/// use wirekit_infrastructure::di::parameters::flatten;
///
/// let flat = flatten(&json!({"type": "local", "port": 8080}), "app_server");
/// assert_eq!(flat["app_server_type"], json!("local"));
/// assert_eq!(flat["app_server_port"], json!(8080));
/// ```
pub fn flatten(subtree: &Value, prefix: &str) -> Map<String, Value> {
    flatten_with(subtree, prefix, MODULE_PARAMETER_SEPARATOR)
}

/// Flatten a subtree, joining segments with `separator`
///
/// Scalar leaves, `null` included, become entries. An empty prefix yields the
/// bare key; empty objects and arrays yield nothing.
pub fn flatten_with(subtree: &Value, prefix: &str, separator: &str) -> Map<String, Value> {
    let mut flat = Map::new();
    walk(subtree, prefix, separator, &mut flat);
    flat
}

/// Flatten a subtree and bind every entry as a parameter
///
/// Returns the number of parameters bound.
pub fn register_parameters(builder: &mut ContainerBuilder, subtree: &Value, prefix: &str) -> usize {
    let flat = flatten(subtree, prefix);
    let count = flat.len();
    builder.merge_parameters(flat);
    count
}

fn walk(node: &Value, path: &str, separator: &str, flat: &mut Map<String, Value>) {
    match node {
        Value::Object(object) => {
            for (key, child) in object {
                walk(child, &join(path, key, separator), separator, flat);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, &join(path, &index.to_string(), separator), separator, flat);
            }
        }
        leaf => {
            flat.insert(path.to_owned(), leaf.clone());
        }
    }
}

fn join(prefix: &str, segment: &str, separator: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}{separator}{segment}")
    }
}
