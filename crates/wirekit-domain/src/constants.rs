//! Domain constants
//!
//! Well-known binding identifiers shared by the kernel and its consumers.

// ============================================================================
// WELL-KNOWN BINDINGS
// ============================================================================

/// Id under which the frozen container is bound to itself
pub const CONTAINER_ID: &str = "container";

/// Id under which the accumulated parameter map is bound
pub const PARAMETERS_ID: &str = "parameters";

/// Id under which the kernel description is bound
pub const KERNEL_ID: &str = "kernel";

/// Id of the HTTP kernel service resolved by `Kernel::boot`
pub const HTTP_KERNEL_ID: &str = "app/components/kernel/http-kernel";

// ============================================================================
// CAPABILITY TAGS
// ============================================================================

/// Tag grouping every router adapter
pub const ROUTER_TAG: &str = "router";

/// Tag grouping every server adapter
pub const SERVER_TAG: &str = "server";

// ============================================================================
// KERNEL PARAMETERS
// ============================================================================

/// Kernel root directory parameter
pub const KERNEL_ROOT_DIR: &str = "kernel_root_dir";

/// Project directory parameter
pub const KERNEL_PROJECT_DIR: &str = "kernel_project_dir";

/// Active environment parameter
pub const KERNEL_ENVIRONMENT: &str = "kernel_environment";

// ============================================================================
// PARAMETER NAMESPACES
// ============================================================================

/// Separator joining module parameter path segments
pub const MODULE_PARAMETER_SEPARATOR: &str = "_";

/// Separator joining container-level parameter path segments
pub const CONTAINER_PARAMETER_SEPARATOR: &str = ".";
