//! Store connection descriptor parsing.
//!
//! A descriptor is a single string of the form
//!
//! ```text
//! <endpoint>?auth=<none|basic>;user=<name>;password=<secret>;ssl=<true|false>;
//! ```
//!
//! `<endpoint>` is either `host:port`, a full engine URL (`mem://`,
//! `rocksdb://data/todos`, `ws://host:port`), or the keyword `memory`
//! for the in-process store.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Keyword selecting the in-process store.
pub const MEMORY_ENDPOINT: &str = "memory";

/// Errors produced while parsing a connection descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Connection descriptor is empty")]
    Empty,

    #[error("Malformed descriptor parameter: {0:?}")]
    MalformedPair(String),

    #[error("Unknown descriptor parameter: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("auth=basic requires both user and password")]
    MissingCredentials,
}

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// In-process store, nothing to connect to.
    Memory,
    /// Remote server given as `host:port`.
    Address(String),
    /// Engine URL used as-is.
    Url(String),
}

/// How to authenticate against the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    None,
    Basic,
}

/// Parsed connection descriptor.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub endpoint: Endpoint,
    pub auth: AuthMode,
    pub user: Option<String>,
    pub password: Option<String>,
    pub ssl: bool,
}

impl ConnectionDescriptor {
    /// Returns true if the descriptor selects the in-process store.
    pub fn is_memory(&self) -> bool {
        self.endpoint == Endpoint::Memory
    }

    /// Returns the engine URL to connect to, or `None` for the in-process store.
    pub fn engine_url(&self) -> Option<String> {
        match &self.endpoint {
            Endpoint::Memory => None,
            Endpoint::Url(url) => Some(url.clone()),
            Endpoint::Address(addr) => {
                let scheme = if self.ssl { "wss" } else { "ws" };
                Some(format!("{}://{}", scheme, addr))
            }
        }
    }

    /// Returns `(user, password)` when basic auth is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.auth, &self.user, &self.password) {
            (AuthMode::Basic, Some(user), Some(password)) => Some((user, password)),
            _ => None,
        }
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("endpoint", &self.endpoint)
            .field("auth", &self.auth)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("ssl", &self.ssl)
            .finish()
    }
}

impl FromStr for ConnectionDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (endpoint, params) = match s.split_once('?') {
            Some((endpoint, params)) => (endpoint.trim(), params),
            None => (s, ""),
        };

        if endpoint.is_empty() {
            return Err(DescriptorError::Empty);
        }

        let endpoint = if endpoint == MEMORY_ENDPOINT {
            Endpoint::Memory
        } else if endpoint.contains("://") {
            Endpoint::Url(endpoint.to_string())
        } else {
            Endpoint::Address(endpoint.to_string())
        };

        let mut descriptor = ConnectionDescriptor {
            endpoint,
            auth: AuthMode::None,
            user: None,
            password: None,
            ssl: false,
        };

        for pair in params.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .ok_or_else(|| DescriptorError::MalformedPair(pair.to_string()))?;

            match key {
                "auth" => {
                    descriptor.auth = match value {
                        "none" => AuthMode::None,
                        "basic" => AuthMode::Basic,
                        _ => return Err(invalid(key, value)),
                    }
                }
                "user" => descriptor.user = Some(value.to_string()),
                "password" => descriptor.password = Some(value.to_string()),
                "ssl" => {
                    descriptor.ssl = value.parse().map_err(|_| invalid(key, value))?;
                }
                other => return Err(DescriptorError::UnknownKey(other.to_string())),
            }
        }

        if descriptor.auth == AuthMode::Basic && descriptor.credentials().is_none() {
            return Err(DescriptorError::MissingCredentials);
        }

        Ok(descriptor)
    }
}

fn invalid(key: &str, value: &str) -> DescriptorError {
    DescriptorError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
