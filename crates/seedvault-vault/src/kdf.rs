// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a password.
//!
//! Vault format version 1 fixes the cost at 600,000 iterations with a 256-bit
//! random salt. Derivation is CPU-bound and runs on the blocking pool.

use std::num::NonZeroU32;

use ring::pbkdf2;
use secrecy::{ExposeSecret, SecretString};
use seedvault_core::SeedVaultError;
use zeroize::Zeroizing;

use crate::crypto::{self, AeadKey, KEY_LEN};

/// PBKDF2 iteration count for vault format version 1.
pub const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(600_000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// Generate a random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], SeedVaultError> {
    crypto::random_bytes::<SALT_LEN>()
}

/// Derive a non-extractable AES-256-GCM key from `password` and `salt`.
///
/// Deterministic for a given (password, salt). The copied password bytes and
/// the raw derived key are wiped before this returns.
pub async fn derive_key(
    password: &SecretString,
    salt: &[u8; SALT_LEN],
) -> Result<AeadKey, SeedVaultError> {
    derive_key_with_iterations(password, salt, PBKDF2_ITERATIONS).await
}

pub(crate) async fn derive_key_with_iterations(
    password: &SecretString,
    salt: &[u8; SALT_LEN],
    iterations: NonZeroU32,
) -> Result<AeadKey, SeedVaultError> {
    let password = Zeroizing::new(password.expose_secret().as_bytes().to_vec());
    let salt = *salt;

    tokio::task::spawn_blocking(move || {
        let raw = derive_raw(&password, &salt, iterations);
        AeadKey::from_bytes(&raw)
    })
    .await
    .map_err(|e| SeedVaultError::Internal(format!("key derivation task failed: {e}")))?
}

fn derive_raw(password: &[u8], salt: &[u8], iterations: NonZeroU32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut out = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        out.as_mut(),
    );
    out
}
