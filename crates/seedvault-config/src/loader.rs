// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./seedvault.toml` > `~/.config/seedvault/seedvault.toml`
//! > `/etc/seedvault/seedvault.toml`, with environment variable overrides via
//! the `SEEDVAULT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SeedvaultConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/seedvault/seedvault.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "seedvault.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/seedvault/seedvault.toml` (system-wide)
/// 3. `~/.config/seedvault/seedvault.toml` (user XDG config)
/// 4. `./seedvault.toml` (local directory)
/// 5. `SEEDVAULT_*` environment variables
pub fn load_config() -> Result<SeedvaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SeedvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SeedvaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SeedvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SeedvaultConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SeedvaultConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("seedvault").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SEEDVAULT_SESSION_IDLE_LOCK_SECS` must map to
/// `session.idle_lock_secs`, not `session.idle.lock.secs`.
///
/// `SEEDVAULT_PASSWORD` and `SEEDVAULT_SECRET` are credentials read by the
/// CLI prompt, not config keys, and are filtered out here.
fn env_provider() -> Env {
    Env::prefixed("SEEDVAULT_")
        .ignore(&["password", "secret"])
        .map(|key| section_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Config sections addressable from the environment.
const SECTIONS: [&str; 4] = ["log", "vault", "session", "storage"];

/// `session_idle_lock_secs` -> `session.idle_lock_secs`. Keys outside a known
/// section pass through unchanged and are rejected at extraction.
fn section_key(key: &str) -> String {
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|field| !field.is_empty())
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or_else(|| key.to_string())
}
