// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted, password-protected [`EncryptedVault`] format.
//!
//! ```json
//! {
//!   "version": 1,
//!   "salt": "<hex, 32 bytes>",
//!   "iv": "<hex, 12 bytes>",
//!   "ciphertext": "<hex, secret length + 16-byte tag>",
//!   "checksum": "<hex, SHA-256 of the plaintext>"
//! }
//! ```

use std::num::NonZeroU32;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use seedvault_core::{SecretBuffer, SeedVaultError};
use tracing::{debug, warn};

use crate::crypto::{self, DIGEST_LEN, IV_LEN, TAG_LEN};
use crate::kdf::{self, SALT_LEN};

/// The only vault format version this build reads and writes.
pub const VAULT_VERSION: u32 = 1;

/// A wallet secret encrypted under a password-derived key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedVault {
    pub version: u32,
    pub salt: String,
    pub iv: String,
    pub ciphertext: String,
    pub checksum: String,
}

impl EncryptedVault {
    /// Serialize to the persisted JSON form.
    pub fn to_json(&self) -> Result<String, SeedVaultError> {
        serde_json::to_string(self)
            .map_err(|e| SeedVaultError::Internal(format!("failed to serialize vault: {e}")))
    }

    /// Parse the persisted JSON form. Field contents are checked on open.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Encrypt `secret` under a key derived from `password` with a fresh salt and IV.
pub async fn seal_vault(
    secret: &SecretBuffer,
    password: &SecretString,
) -> Result<EncryptedVault, SeedVaultError> {
    seal_with_iterations(secret, password, kdf::PBKDF2_ITERATIONS).await
}

/// Decrypt a vault and verify its checksum.
///
/// Errors:
/// - [`SeedVaultError::VaultVersionUnsupported`] for any version but 1.
/// - [`SeedVaultError::InvalidPassword`] when a field is malformed or the
///   AEAD tag does not verify.
/// - [`SeedVaultError::Integrity`] when decryption succeeds but the checksum
///   does not match.
pub async fn open_vault(
    vault: &EncryptedVault,
    password: &SecretString,
) -> Result<SecretBuffer, SeedVaultError> {
    open_with_iterations(vault, password, kdf::PBKDF2_ITERATIONS).await
}

pub(crate) async fn seal_with_iterations(
    secret: &SecretBuffer,
    password: &SecretString,
    iterations: NonZeroU32,
) -> Result<EncryptedVault, SeedVaultError> {
    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key_with_iterations(password, &salt, iterations).await?;
    let sealed = crypto::encrypt(secret.expose_bytes(), &key)?;
    let checksum = crypto::sha256(secret.expose_bytes());

    debug!(version = VAULT_VERSION, "vault sealed");
    Ok(EncryptedVault {
        version: VAULT_VERSION,
        salt: hex::encode(salt),
        iv: hex::encode(sealed.iv),
        ciphertext: hex::encode(sealed.ciphertext),
        checksum: hex::encode(checksum),
    })
}

pub(crate) async fn open_with_iterations(
    vault: &EncryptedVault,
    password: &SecretString,
    iterations: NonZeroU32,
) -> Result<SecretBuffer, SeedVaultError> {
    if vault.version != VAULT_VERSION {
        return Err(SeedVaultError::VaultVersionUnsupported(vault.version));
    }

    let salt: [u8; SALT_LEN] = decode_fixed(&vault.salt)?;
    let iv: [u8; IV_LEN] = decode_fixed(&vault.iv)?;
    let checksum: [u8; DIGEST_LEN] = decode_fixed(&vault.checksum)?;
    let ciphertext = hex::decode(&vault.ciphertext).map_err(|_| SeedVaultError::InvalidPassword)?;
    if ciphertext.len() < TAG_LEN {
        return Err(SeedVaultError::InvalidPassword);
    }

    let key = kdf::derive_key_with_iterations(password, &salt, iterations).await?;
    let mut plaintext =
        crypto::decrypt(&ciphertext, &iv, &key).map_err(|_| SeedVaultError::InvalidPassword)?;

    if !crypto::timing_safe_eq(&crypto::sha256(&plaintext), &checksum) {
        warn!("vault decrypted but checksum verification failed");
        return Err(SeedVaultError::Integrity);
    }

    SecretBuffer::from_bytes(std::mem::take(&mut *plaintext)).map_err(|_| SeedVaultError::Integrity)
}

/// Decode a hex field of exactly `N` bytes. Any defect reads as a bad password.
fn decode_fixed<const N: usize>(field: &str) -> Result<[u8; N], SeedVaultError> {
    let mut out = [0u8; N];
    hex::decode_to_slice(field, &mut out).map_err(|_| SeedVaultError::InvalidPassword)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> NonZeroU32 {
        NonZeroU32::new(1_000).unwrap()
    }

    fn password() -> SecretString {
        SecretString::from("correct-horse-battery")
    }

    async fn sealed() -> EncryptedVault {
        let secret = SecretBuffer::from("snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
        seal_with_iterations(&secret, &password(), fast()).await.unwrap()
    }

    #[tokio::test]
    async fn seal_open_roundtrip() {
        let vault = sealed().await;
        let secret = open_with_iterations(&vault, &password(), fast()).await.unwrap();
        assert_eq!(secret.expose_str(), "snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
    }

    #[tokio::test]
    async fn sealed_fields_have_documented_sizes() {
        let vault = sealed().await;
        assert_eq!(vault.version, 1);
        assert_eq!(vault.salt.len(), SALT_LEN * 2);
        assert_eq!(vault.iv.len(), IV_LEN * 2);
        assert_eq!(vault.checksum.len(), DIGEST_LEN * 2);
        assert_eq!(vault.ciphertext.len(), (29 + TAG_LEN) * 2);
    }

    #[tokio::test]
    async fn json_uses_documented_field_names() {
        let vault = sealed().await;
        let value: serde_json::Value = serde_json::from_str(&vault.to_json().unwrap()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["checksum", "ciphertext", "iv", "salt", "version"]);
        assert_eq!(EncryptedVault::from_json(&vault.to_json().unwrap()).unwrap(), vault);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_password() {
        let vault = sealed().await;
        let err = open_with_iterations(&vault, &SecretString::from("wrong-horse-battery"), fast())
            .await
            .unwrap_err();
        assert!(matches!(err, SeedVaultError::InvalidPassword));
    }

    #[tokio::test]
    async fn flipped_checksum_bit_is_integrity_error() {
        let mut vault = sealed().await;
        let mut checksum = hex::decode(&vault.checksum).unwrap();
        checksum[31] ^= 0x01;
        vault.checksum = hex::encode(checksum);

        let err = open_with_iterations(&vault, &password(), fast()).await.unwrap_err();
        assert!(matches!(err, SeedVaultError::Integrity));
    }

    #[tokio::test]
    async fn flipped_ciphertext_bit_is_invalid_password() {
        let mut vault = sealed().await;
        let mut ciphertext = hex::decode(&vault.ciphertext).unwrap();
        ciphertext[0] ^= 0x40;
        vault.ciphertext = hex::encode(ciphertext);

        let err = open_with_iterations(&vault, &password(), fast()).await.unwrap_err();
        assert!(matches!(err, SeedVaultError::InvalidPassword));
    }

    #[tokio::test]
    async fn unknown_version_is_rejected_before_decrypting() {
        let mut vault = sealed().await;
        vault.version = 2;
        let err = open_with_iterations(&vault, &password(), fast()).await.unwrap_err();
        assert!(matches!(err, SeedVaultError::VaultVersionUnsupported(2)));
    }

    #[tokio::test]
    async fn malformed_fields_read_as_invalid_password() {
        let good = sealed().await;

        let mut short_salt = good.clone();
        short_salt.salt.truncate(10);
        let mut bad_hex_iv = good.clone();
        bad_hex_iv.iv = "zz".repeat(IV_LEN);
        let mut tiny_ciphertext = good.clone();
        tiny_ciphertext.ciphertext = "00".into();

        for vault in [short_salt, bad_hex_iv, tiny_ciphertext] {
            let err = open_with_iterations(&vault, &password(), fast()).await.unwrap_err();
            assert!(matches!(err, SeedVaultError::InvalidPassword), "{err:?}");
        }
    }

    #[tokio::test]
    async fn each_seal_uses_fresh_salt_and_iv() {
        let a = sealed().await;
        let b = sealed().await;
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.iv, b.iv);
        assert_eq!(a.checksum, b.checksum);
    }
}
