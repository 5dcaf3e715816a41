// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 wallet keypair derivation and address encoding.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use seedvault_core::{SecretBuffer, SeedVaultError, WalletAddress};
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

/// Prefix marking an Ed25519 public key in signed transactions.
pub const ED25519_KEY_PREFIX: &str = "ED";

/// An Ed25519 keypair derived from a wallet secret.
///
/// Lives only for the duration of one adapter call. The signing key wipes
/// itself on drop.
pub struct WalletKeypair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl WalletKeypair {
    /// Derive the keypair for a wallet secret.
    ///
    /// A 64-digit hex private key (optionally `00`/`ED` prefixed) is used as
    /// the seed directly. Family seeds and mnemonics are hashed: the seed is
    /// the first half of their SHA-512 digest.
    pub fn from_secret(secret: &SecretBuffer) -> Result<Self, SeedVaultError> {
        let text = secret.expose_str().trim();
        let mut seed = Zeroizing::new([0u8; 32]);

        let hex_digits = match text.len() {
            66 => text.get(2..),
            64 => Some(text),
            _ => None,
        };
        match hex_digits {
            Some(digits) if hex::decode_to_slice(digits, &mut seed[..]).is_ok() => {}
            _ => {
                let mut digest = Zeroizing::new([0u8; 64]);
                Sha512::new_with_prefix(text.as_bytes())
                    .finalize_into(GenericArray::from_mut_slice(&mut digest[..]));
                seed.copy_from_slice(&digest[..32]);
            }
        }

        Ok(Self::from_seed(&seed))
    }

    /// Reconstruct a keypair from raw seed bytes.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = VerifyingKey::from(&signing_key);
        Self {
            signing_key,
            verifying_key,
        }
    }

    pub fn public_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Upper-case hex public key with the `ED` prefix.
    pub fn public_hex(&self) -> String {
        format!(
            "{ED25519_KEY_PREFIX}{}",
            hex::encode_upper(self.public_bytes())
        )
    }

    /// `r` followed by the hex of the first 20 bytes of SHA-256(public key).
    pub fn address(&self) -> WalletAddress {
        let digest = Sha256::digest(self.public_bytes());
        WalletAddress(format!("r{}", hex::encode(&digest[..20])))
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl std::fmt::Debug for WalletKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletKeypair")
            .field("public", &self.public_hex())
            .finish_non_exhaustive()
    }
}

/// Verify a signature made by the holder of the `ED`-prefixed `public_hex`.
///
/// Strict verification rejects weak public keys.
pub fn verify_strict(
    public_hex: &str,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SeedVaultError> {
    let digits = public_hex
        .strip_prefix(ED25519_KEY_PREFIX)
        .ok_or_else(|| SeedVaultError::Signing {
            message: "public key is not an Ed25519 key".to_string(),
        })?;
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| SeedVaultError::Signing {
        message: format!("malformed public key: {e}"),
    })?;
    let key = VerifyingKey::from_bytes(&bytes).map_err(|e| SeedVaultError::Signing {
        message: format!("invalid public key: {e}"),
    })?;
    key.verify_strict(message, signature)
        .map_err(|e| SeedVaultError::Signing {
            message: format!("Ed25519 signature verification failed: {e}"),
        })
}
