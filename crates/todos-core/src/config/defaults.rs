//! Default values for Todos configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Server Defaults
// ============================================================================

/// Address the HTTP server binds to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the HTTP server listens on.
pub const DEFAULT_PORT: u16 = 5000;

// ============================================================================
// Store Defaults
// ============================================================================

/// Connection descriptor for the document store.
///
/// `memory` selects the in-process store; see
/// [`ConnectionDescriptor`](super::ConnectionDescriptor) for the full syntax.
pub const DEFAULT_CONNECTION: &str = "127.0.0.1:8000?auth=basic;user=root;password=root;ssl=false;";

/// Path of the task collection. The last segment names the table.
pub const DEFAULT_STORE_PATH: &str = "/apps/todos";

/// Namespace the task database lives in.
pub const DEFAULT_NAMESPACE: &str = "todos";

// ============================================================================
// Query Defaults
// ============================================================================

/// Whether list queries also fetch the query plan (logged at debug level).
pub const DEFAULT_INCLUDE_QUERY_PLAN: bool = true;

/// Timeout applied to list queries (1 second).
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 1000;

/// Whether list results keep the store-native record identifier.
pub const DEFAULT_RESULT_AS_DOCUMENT: bool = false;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Log filter used when neither the CLI nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// File Names
// ============================================================================

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "todos.toml";

/// Directory under the user config dir holding `config.toml`.
pub const DEFAULT_CONFIG_DIR: &str = "todos";
