// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Seedvault key manager.
//!
//! Every message rendered by [`SeedVaultError`] is safe to show to a user:
//! none of them carries key material, passwords, or raw provider output.

use thiserror::Error;

/// The primary error type used across all Seedvault crates.
#[derive(Debug, Error)]
pub enum SeedVaultError {
    /// The secret is not a family seed, hex private key, or recognized mnemonic.
    #[error("invalid secret format: expected a family seed, hex private key, or mnemonic phrase")]
    InvalidSecretFormat,

    /// The signing adapter refused to derive an address from the secret.
    #[error("could not derive a wallet address from this secret")]
    InvalidSecretDerivation,

    /// Wrong password, or a vault that fails authentication.
    ///
    /// Deliberately covers both cases so callers cannot tell a bad password
    /// from a damaged vault.
    #[error("invalid password")]
    InvalidPassword,

    /// The decrypted secret does not match the stored checksum.
    ///
    /// Only raised below the key manager boundary, which reports it as
    /// [`SeedVaultError::InvalidPassword`].
    #[error("invalid password")]
    Integrity,

    /// The password is shorter than the configured minimum.
    #[error("password is too weak: use at least {min_length} characters")]
    WeakPassword { min_length: usize },

    /// The persisted vault was written by an unknown format version.
    #[error("unsupported vault version {0}")]
    VaultVersionUnsupported(u32),

    /// A secret is resident but its session key has been discarded.
    #[error("wallet is locked: unlock it again with your password")]
    WalletLocked,

    /// No secret has been loaded into the key manager.
    #[error("no wallet key loaded: import or unlock a wallet first")]
    NoKeyLoaded,

    /// Durable storage could not be read or written.
    #[error("storage unavailable: {source}")]
    StorageUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The signing adapter failed to sign a transaction.
    #[error("transaction signing failed: {message}")]
    Signing { message: String },

    /// The platform crypto provider failed (RNG, key construction).
    #[error("crypto provider error: {0}")]
    Crypto(String),

    /// A command argument was rejected before any key material was touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SeedVaultError {
    /// Wrap any error as [`SeedVaultError::StorageUnavailable`].
    pub fn storage<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::StorageUnavailable {
            source: source.into(),
        }
    }

    /// Whether this error means "the password did not open the vault".
    pub fn is_invalid_password(&self) -> bool {
        matches!(self, Self::InvalidPassword | Self::Integrity)
    }
}
