// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Seedvault key manager.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Smallest password length the vault will ever accept.
pub const MIN_PASSWORD_LENGTH_FLOOR: usize = 12;

/// Top-level Seedvault configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeedvaultConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Vault (password-wrapped persistence) settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// In-memory session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Vault configuration.
///
/// The KDF itself is fixed by the vault format version and is not
/// configurable here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Minimum password length (in characters) accepted by `create_vault`.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_min_password_length() -> usize {
    MIN_PASSWORD_LENGTH_FLOOR
}

/// In-memory session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds the host may stay hidden before the wallet is locked.
    #[serde(default = "default_idle_lock_secs")]
    pub idle_lock_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_lock_secs: default_idle_lock_secs(),
        }
    }
}

fn default_idle_lock_secs() -> u64 {
    300
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("seedvault").join("seedvault.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("seedvault.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}
