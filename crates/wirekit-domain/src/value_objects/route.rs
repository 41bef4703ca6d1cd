//! Route definitions consumed by the HTTP kernel

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One entry of the `routes` list in the routing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// URL path
    #[serde(default)]
    pub path: String,

    /// Container id of the controller handling the route
    #[serde(default)]
    pub controller: Option<String>,

    /// REST method, defaults to `get`
    #[serde(default)]
    pub method: Option<String>,

    /// Controller action, defaults to the method name
    #[serde(default)]
    pub action: Option<String>,
}

/// The routing configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Declared routes in order
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// Supported REST methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Lowercase method name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "put" => Ok(Self::Put),
            "post" => Ok(Self::Post),
            "delete" => Ok(Self::Delete),
            other => Err(format!("Invalid REST method: {other}")),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route after defaults and validation were applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Container id of the controller
    pub controller: String,
    /// URL path
    pub path: String,
    /// REST method
    pub method: HttpMethod,
    /// Handler name on the controller, e.g. `get_action`
    pub action: String,
}
