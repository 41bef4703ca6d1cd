//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Binding ids shared with consumers are defined in `wirekit_domain::constants`.

// ============================================================================
// KERNEL SETTINGS CONSTANTS
// ============================================================================

/// Kernel settings file, looked up in the project directory
pub const DEFAULT_SETTINGS_FILENAME: &str = "wirekit.toml";

/// Environment variable prefix for kernel settings
pub const SETTINGS_ENV_PREFIX: &str = "WIREKIT";

/// Default environment name
pub const DEFAULT_ENVIRONMENT: &str = "dev";

// ============================================================================
// CONFIGURATION FILE CONSTANTS
// ============================================================================

/// Configuration directory, relative to the project directory
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Base name of the configuration tree files (`config.json`, `config_{env}.json`)
pub const CONFIG_TREE_BASENAME: &str = "config";

/// Base name of the container documents (`services.json`, `services_{env}.json`)
pub const SERVICES_BASENAME: &str = "services";

/// Extension of configuration documents
pub const CONFIG_FILE_EXTENSION: &str = "json";

// ============================================================================
// APP MODULE CONSTANTS
// ============================================================================

/// Root namespace of the app module
pub const APP_MODULE_ROOT: &str = "framework";

/// Name of the app module
pub const APP_MODULE_NAME: &str = "app";

/// Parameter prefix of the server subtree
pub const APP_SERVER_PREFIX: &str = "app_server";

/// Parameter prefix of the router subtree
pub const APP_ROUTER_PREFIX: &str = "app_router";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WIREKIT_LOG";

/// Log file stem used when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "wirekit";
