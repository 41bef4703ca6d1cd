//! Kernel settings types

use super::logging::LoggingConfig;
use crate::constants::{DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Built-in configuration modules that can be enabled by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Server and router settings under `framework.app`
    App,
}

impl ModuleKind {
    /// Configured name of the module
    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings driving one kernel bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelSettings {
    /// Environment name selecting `*_{env}.json` overlays
    pub environment: String,

    /// Project directory; the current directory when unset
    pub project_dir: Option<PathBuf>,

    /// Framework root directory; the project directory when unset
    pub root_dir: Option<PathBuf>,

    /// Configuration directory, relative to the project directory
    pub config_dir: PathBuf,

    /// Enabled modules, processed in this order
    pub modules: Vec<ModuleKind>,

    /// Construct every service right after the container is frozen
    pub eager_singletons: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            project_dir: None,
            root_dir: None,
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            modules: vec![ModuleKind::App],
            eager_singletons: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl KernelSettings {
    /// Settings for a project directory with every other field defaulted
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: Some(project_dir.into()),
            ..Self::default()
        }
    }

    /// Set the environment name
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Resolved project directory
    pub fn project_dir(&self) -> PathBuf {
        self.project_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolved framework root directory
    pub fn root_dir(&self) -> PathBuf {
        self.root_dir.clone().unwrap_or_else(|| self.project_dir())
    }

    /// Resolved configuration directory
    pub fn config_dir(&self) -> PathBuf {
        resolve_under(&self.project_dir(), &self.config_dir)
    }
}

fn resolve_under(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
