// SPDX-FileCopyrightText: 2026 Apex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./apex.toml` > `~/.config/apex/apex.toml` >
//! `/etc/apex/apex.toml` with environment variable overrides via the
//! `APEX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ApexConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/apex/apex.toml` (system-wide)
/// 3. `~/.config/apex/apex.toml` (user XDG config)
/// 4. `./apex.toml` (local directory)
/// 5. `APEX_*` environment variables
pub fn load_config() -> Result<ApexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ApexConfig::default()))
        .merge(Toml::file("/etc/apex/apex.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("apex/apex.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("apex.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ApexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ApexConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ApexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ApexConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `APEX_ROUTING_DEFAULT_REGION` must map
/// to `routing.default_region`, not `routing.default.region`.
fn env_provider() -> Env {
    Env::prefixed("APEX_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: APEX_ROUTING_CREATIVE_CHAIN_PERCENT -> "routing_creative_chain_percent"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("classifier_", "classifier.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("regions_", "regions.", 1)
            .replacen("backends_", "backends.", 1);
        mapped.into()
    })
}
