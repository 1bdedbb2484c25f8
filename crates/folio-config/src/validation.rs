// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: bindable host names,
//! recognized store URI schemes, and sane paging and timeout bounds.

use crate::diagnostic::ConfigError;
use crate::model::{FolioConfig, SUPPORTED_SCHEMES};

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &FolioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!("server.host `{host}` is not a valid IP address or hostname"));
        }
    }

    if let Some(uri) = config.storage.uri.as_deref() {
        let uri = uri.trim();
        if !uri.is_empty() && !SUPPORTED_SCHEMES.iter().any(|s| uri.starts_with(s)) {
            fail(format!(
                "storage.uri has an unsupported scheme; expected one of {}",
                SUPPORTED_SCHEMES.join(", ")
            ));
        }
    }

    if config.storage.database.trim().is_empty() {
        fail("storage.database must not be empty".to_string());
    }

    if config.storage.timeout_secs == 0 {
        fail("storage.timeout_secs must be at least 1".to_string());
    }

    if config.listing.default_limit == 0 {
        fail("listing.default_limit must be at least 1".to_string());
    }

    if let Some(max) = config.listing.max_limit
        && max < config.listing.default_limit
    {
        fail(format!(
            "listing.max_limit ({max}) must not be below listing.default_limit ({})",
            config.listing.default_limit
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&FolioConfig::default()).is_ok());
    }

    #[test]
    fn missing_storage_uri_is_not_a_startup_error() {
        let config = FolioConfig::default();
        assert!(config.storage.uri.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unsupported_scheme_fails_without_echoing_uri() {
        let mut config = FolioConfig::default();
        config.storage.uri = Some("postgres://user:secret@db/site".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "unsupported scheme"));
        assert!(!errors.iter().any(|e| e.to_string().contains("secret")));
    }

    #[test]
    fn accepts_every_supported_scheme() {
        for uri in [
            "mongodb://localhost:27017",
            "mongodb+srv://cluster.example.net",
            "sqlite://folio.db",
            "sqlite::memory:",
        ] {
            let mut config = FolioConfig::default();
            config.storage.uri = Some(uri.into());
            assert!(validate_config(&config).is_ok(), "{uri} should validate");
        }
    }

    #[test]
    fn zero_timeout_and_limit_fail() {
        let mut config = FolioConfig::default();
        config.storage.timeout_secs = 0;
        config.listing.default_limit = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_error(&errors, "timeout_secs"));
        assert!(has_error(&errors, "default_limit"));
    }

    #[test]
    fn max_limit_below_default_fails() {
        let mut config = FolioConfig::default();
        config.listing.max_limit = Some(5);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "listing.max_limit"));
    }

    #[test]
    fn sparse_file_fills_defaults_and_validates() {
        let toml_str = r#"
[storage]
uri = "mongodb://localhost:27017"

[listing]
max_limit = 100
"#;
        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.database, FolioConfig::default().storage.database);
        assert_eq!(config.listing.default_limit, 10);
        assert_eq!(config.listing.max_limit, Some(100));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn file_with_several_violations_reports_all_of_them() {
        let toml_str = r#"
[server]
host = ""

[storage]
uri = "redis://cache:6379"
timeout_secs = 0
"#;
        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(has_error(&errors, "unsupported scheme"));
        assert!(has_error(&errors, "timeout_secs"));
    }

    #[test]
    fn bad_host_fails() {
        let mut config = FolioConfig::default();
        config.server.host = "not a host!".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "server.host"));
    }
}
