// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./folio.toml` > `~/.config/folio/folio.toml` > `/etc/folio/folio.toml`
//! with environment variable overrides via the `FOLIO_` prefix. The bare
//! `MONGODB_URI` and `MONGODB_DB` variables are honored as well, below `FOLIO_*`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FolioConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/folio/folio.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "folio.toml";

/// The per-user config file under the XDG config dir, if one can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/folio/folio.toml`
/// 3. `~/.config/folio/folio.toml`
/// 4. `./folio.toml`
/// 5. `MONGODB_URI` / `MONGODB_DB`
/// 6. `FOLIO_*` environment variables
pub fn load_config() -> Result<FolioConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<FolioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FolioConfig, figment::Error> {
    with_env(
        Figment::new()
            .merge(Serialized::defaults(FolioConfig::default()))
            .merge(Toml::file(path)),
    )
    .extract()
}

/// The full figment before extraction, for callers that inspect metadata.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(FolioConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    with_env(figment.merge(Toml::file(LOCAL_CONFIG_FILE)))
}

/// Layers the legacy variables, then the `FOLIO_` variables, on top of `figment`.
pub fn with_env(figment: Figment) -> Figment {
    figment.merge(legacy_env_provider()).merge(env_provider())
}

/// `MONGODB_URI` -> `storage.uri`, `MONGODB_DB` -> `storage.database`.
fn legacy_env_provider() -> Env {
    Env::raw()
        .only(&["MONGODB_URI", "MONGODB_DB"])
        .map(|key| {
            if key.as_str().eq_ignore_ascii_case("MONGODB_URI") {
                "storage.uri".into()
            } else {
                "storage.database".into()
            }
        })
}

/// Maps `FOLIO_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys contain
/// underscores: `FOLIO_STORAGE_TIMEOUT_SECS` is `storage.timeout_secs`.
fn env_provider() -> Env {
    Env::prefixed("FOLIO_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        let mapped = ["server", "storage", "listing", "prometheus"]
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key);
        mapped.into()
    })
}
