//! Configuration management for Todos.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Explicit `--config` file, or project-local `todos.toml`
//! 3. User config `~/.config/todos/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

mod defaults;
mod descriptor;

pub use defaults::*;
pub use descriptor::{AuthMode, ConnectionDescriptor, DescriptorError, Endpoint, MEMORY_ENDPOINT};

use crate::query::QueryOptions;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid connection descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Document store configuration.
    pub store: StoreConfig,

    /// Options passed with every list query.
    pub query: QueryConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./todos.toml` (project local)
    /// 2. `~/.config/todos/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(DEFAULT_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("TODOS_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TODOS_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("TODOS_PORT={}", port)))?;
        }

        if let Ok(connection) = std::env::var("TODOS_CONNECTION") {
            self.store.connection = connection;
        }
        if let Ok(path) = std::env::var("TODOS_STORE_PATH") {
            self.store.store_path = path;
        }
        if let Ok(namespace) = std::env::var("TODOS_NAMESPACE") {
            self.store.namespace = namespace;
        }

        if let Ok(timeout) = std::env::var("TODOS_QUERY_TIMEOUT_MS") {
            self.query.timeout_ms = timeout
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("TODOS_QUERY_TIMEOUT_MS={}", timeout)))?;
        }

        if let Ok(level) = std::env::var("TODOS_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Require the anti-forgery token on form submissions.
    pub csrf: bool,

    /// Open the task list in a browser after starting.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            csrf: true,
            open_browser: false,
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection descriptor, see [`ConnectionDescriptor`].
    pub connection: String,

    /// Collection path, e.g. `/apps/todos`.
    pub store_path: String,

    /// Namespace holding the database.
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION.to_string(),
            store_path: DEFAULT_STORE_PATH.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse the connection descriptor.
    pub fn descriptor(&self) -> Result<ConnectionDescriptor, ConfigError> {
        Ok(self.connection.parse()?)
    }
}

/// Options forwarded to the store on every list query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Fetch and log the query plan alongside results.
    pub include_query_plan: bool,

    /// Abort the query after this many milliseconds.
    pub timeout_ms: u64,

    /// Keep the store-native record identifier in results.
    pub result_as_document: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            include_query_plan: DEFAULT_INCLUDE_QUERY_PLAN,
            timeout_ms: DEFAULT_QUERY_TIMEOUT_MS,
            result_as_document: DEFAULT_RESULT_AS_DOCUMENT,
        }
    }
}

impl QueryConfig {
    /// Build the options passed to [`TaskStore::find`](crate::storage::TaskStore::find).
    pub fn options(&self) -> QueryOptions {
        QueryOptions {
            include_query_plan: self.include_query_plan,
            timeout: Duration::from_millis(self.timeout_ms),
            result_as_document: self.result_as_document,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `todos_core=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
