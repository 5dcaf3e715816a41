// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password and secret acquisition via TTY prompt or environment variable.

use secrecy::{ExposeSecret, SecretString};
use seedvault_core::{SecretBuffer, SeedVaultError};

/// Environment variable carrying the vault password (headless use).
pub const PASSWORD_ENV_VAR: &str = "SEEDVAULT_PASSWORD";

/// Environment variable carrying the wallet secret to import (headless use).
pub const SECRET_ENV_VAR: &str = "SEEDVAULT_SECRET";

fn from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn stdin_is_terminal() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}

fn read_hidden(prompt: &str) -> Result<SecretString, SeedVaultError> {
    eprint!("{prompt}");
    let value = rpassword::read_password()
        .map_err(|e| SeedVaultError::Internal(format!("failed to read from terminal: {e}")))?;
    if value.is_empty() {
        return Err(SeedVaultError::Config("empty input not allowed".to_string()));
    }
    Ok(SecretString::from(value))
}

fn no_input(what: &str, var: &str) -> SeedVaultError {
    SeedVaultError::Config(format!(
        "no {what} provided: set {var} or run interactively"
    ))
}

/// Get the vault password.
///
/// Priority:
/// 1. `SEEDVAULT_PASSWORD` environment variable
/// 2. Interactive TTY prompt via `rpassword`
pub fn read_password() -> Result<SecretString, SeedVaultError> {
    if let Some(password) = from_env(PASSWORD_ENV_VAR) {
        return Ok(SecretString::from(password));
    }
    if stdin_is_terminal() {
        return read_hidden("Vault password: ");
    }
    Err(no_input("password", PASSWORD_ENV_VAR))
}

/// Get a new vault password, asking twice on a terminal.
pub fn read_new_password() -> Result<SecretString, SeedVaultError> {
    if let Some(password) = from_env(PASSWORD_ENV_VAR) {
        return Ok(SecretString::from(password));
    }
    if stdin_is_terminal() {
        let first = read_hidden("New vault password: ")?;
        let second = read_hidden("Confirm vault password: ")?;
        if first.expose_secret() != second.expose_secret() {
            return Err(SeedVaultError::Config("passwords do not match".to_string()));
        }
        return Ok(first);
    }
    Err(no_input("password", PASSWORD_ENV_VAR))
}

/// Get the wallet secret to import.
pub fn read_secret() -> Result<SecretBuffer, SeedVaultError> {
    if let Some(secret) = from_env(SECRET_ENV_VAR) {
        return Ok(SecretBuffer::from_string(secret));
    }
    if stdin_is_terminal() {
        let secret = read_hidden("Wallet secret (seed, key, or mnemonic): ")?;
        return Ok(SecretBuffer::from(secret.expose_secret()));
    }
    Err(no_input("wallet secret", SECRET_ENV_VAR))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn password_from_env_var() {
        // SAFETY: test-only env mutation, serialized with #[serial].
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "correct-horse-battery") };
        let result = read_password();
        let confirmed = read_new_password();
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "correct-horse-battery");
        assert_eq!(confirmed.unwrap().expose_secret(), "correct-horse-battery");
    }

    #[test]
    #[serial]
    fn secret_from_env_var() {
        unsafe { std::env::set_var(SECRET_ENV_VAR, "snoPBrXtMeMyMHUVTgbuqAfg1SUTb") };
        let result = read_secret();
        unsafe { std::env::remove_var(SECRET_ENV_VAR) };

        assert_eq!(result.unwrap().expose_str(), "snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
    }

    #[test]
    #[serial]
    fn empty_env_var_is_ignored() {
        // A terminal stdin would block on the prompt.
        if stdin_is_terminal() {
            return;
        }
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "") };
        let result = read_password();
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };

        let err = result.unwrap_err();
        assert!(err.to_string().contains(PASSWORD_ENV_VAR));
    }
}
