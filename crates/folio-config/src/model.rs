// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Folio contact service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// URI schemes accepted for `storage.uri`.
pub const SUPPORTED_SCHEMES: &[&str] = &["mongodb://", "mongodb+srv://", "sqlite://", "sqlite:"];

/// Top-level Folio configuration.
///
/// Loaded once at process start and handed to constructors explicitly.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Submission store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listing endpoint settings.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Prometheus exporter settings.
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            allowed_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Submission store configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Store connection string. `None` leaves the write and read paths
    /// answering with a configuration error.
    #[serde(default)]
    pub uri: Option<String>,

    /// Database name inside the store.
    #[serde(default = "default_database")]
    pub database: String,

    /// Upper bound on connect plus one operation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a non-blank connection string is present.
    pub fn is_configured(&self) -> bool {
        self.uri.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database: default_database(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("uri", &self.uri.as_ref().map(|_| "[redacted]"))
            .field("database", &self.database)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_database() -> String {
    "portfolio".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Listing endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// Page size used when `limit` is absent or unparsable.
    #[serde(default = "default_limit")]
    pub default_limit: u64,

    /// Optional cap on `limit`. `None` leaves page size unbounded.
    #[serde(default)]
    pub max_limit: Option<u64>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: None,
        }
    }
}

fn default_limit() -> u64 {
    10
}

/// Prometheus exporter configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrometheusConfig {
    /// Install the recorder and serve `/metrics`.
    #[serde(default)]
    pub enabled: bool,
}
