// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the password-length floor, a non-zero idle timeout, and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::{MIN_PASSWORD_LENGTH_FLOOR, SeedvaultConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SeedvaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.log.level.trim().to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.vault.min_password_length < MIN_PASSWORD_LENGTH_FLOOR {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.min_password_length must be at least {MIN_PASSWORD_LENGTH_FLOOR}, got {}",
                config.vault.min_password_length
            ),
        });
    }

    if config.session.idle_lock_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "session.idle_lock_secs must be greater than 0".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
