//! Configuration loader
//!
//! Two kinds of configuration feed a bootstrap:
//!
//! - Kernel settings, merged by figment from defaults, `wirekit.toml` in the project
//!   directory and `WIREKIT_*` environment variables.
//! - JSON documents under the configuration directory: the configuration tree
//!   (`config.json` deep-merged with `config_{env}.json`) and the container
//!   documents (`services.json`, then `services_{env}.json`). These are read with
//!   serde_json so key order survives.

use crate::config::KernelSettings;
use crate::constants::{
    CONFIG_FILE_EXTENSION, CONFIG_TREE_BASENAME, DEFAULT_SETTINGS_FILENAME, SERVICES_BASENAME,
    SETTINGS_ENV_PREFIX,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde_json::Value;
use std::path::{Path, PathBuf};
use wirekit_domain::error::Result;

/// Kernel settings loader
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// Project directory the settings file is looked up in
    project_dir: Option<PathBuf>,

    /// Explicit settings file path
    settings_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Create a loader with default settings
    pub fn new() -> Self {
        Self {
            project_dir: None,
            settings_path: None,
            env_prefix: SETTINGS_ENV_PREFIX.to_string(),
        }
    }

    /// Set the project directory
    pub fn with_project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the settings file path
    pub fn with_settings_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load settings from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. `KernelSettings::default()`
    /// 2. The settings file (if it exists)
    /// 3. Environment variables with the prefix, nested keys split on `__`
    ///    (e.g. `WIREKIT_ENVIRONMENT`, `WIREKIT_LOGGING__LEVEL`)
    pub fn load(&self) -> Result<KernelSettings> {
        let mut figment = Figment::new().merge(Serialized::defaults(KernelSettings::default()));

        if let Some(path) = self.settings_file() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                log_config_loaded(&path, true);
            } else if self.settings_path.is_some() {
                log_config_loaded(&path, false);
            }
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("__"));

        let mut settings: KernelSettings = figment
            .extract()
            .context("Failed to extract kernel settings")?;

        if settings.project_dir.is_none() {
            settings.project_dir.clone_from(&self.project_dir);
        }
        Ok(settings)
    }

    fn settings_file(&self) -> Option<PathBuf> {
        self.settings_path.clone().or_else(|| {
            self.project_dir
                .as_ref()
                .map(|dir| dir.join(DEFAULT_SETTINGS_FILENAME))
        })
    }
}

/// Locates the JSON documents of one environment
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    config_dir: PathBuf,
    environment: String,
}

impl ConfigLocator {
    /// Create a locator for a configuration directory and environment
    pub fn new(config_dir: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            environment: environment.into(),
        }
    }

    /// Locator for resolved kernel settings
    pub fn from_settings(settings: &KernelSettings) -> Self {
        Self::new(settings.config_dir(), settings.environment.clone())
    }

    /// Configuration directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Configuration tree files, base first
    pub fn config_tree_files(&self) -> Vec<PathBuf> {
        self.layered(CONFIG_TREE_BASENAME)
    }

    /// Container documents, base first
    pub fn services_files(&self) -> Vec<PathBuf> {
        self.layered(SERVICES_BASENAME)
    }

    fn layered(&self, basename: &str) -> Vec<PathBuf> {
        let mut files = vec![
            self.config_dir
                .join(format!("{basename}.{CONFIG_FILE_EXTENSION}")),
        ];
        if !self.environment.is_empty() {
            files.push(self.config_dir.join(format!(
                "{basename}_{}.{CONFIG_FILE_EXTENSION}",
                self.environment
            )));
        }
        files
    }
}

/// Read one JSON document, `None` when the file does not exist
pub fn read_json_document(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .io_context(format!("Failed to read {}", path.display()))?;
    let document = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    log_config_loaded(path, true);
    Ok(Some(document))
}

/// Merge `overlay` into `base`
///
/// Objects merge key by key, recursively; any other overlay value replaces the
/// base value. New keys are appended after the existing ones.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
