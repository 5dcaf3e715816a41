// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level primitives: secure random bytes, AES-256-GCM seal/open,
//! SHA-256, and constant-time comparison.
//!
//! Every call to [`encrypt`] draws a fresh random 96-bit IV from the system
//! CSPRNG. A repeated (key, IV) pair would be catastrophic for GCM.

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::digest::{SHA256, digest};
use ring::rand::{SecureRandom, SystemRandom};
use seedvault_core::SeedVaultError;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// GCM IV length in bytes.
pub const IV_LEN: usize = 12;
/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// SHA-256 digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// An AES-256-GCM key whose raw bytes cannot be read back.
///
/// Key material only enters through [`AeadKey::generate`] or the KDF; the
/// handle exposes encryption and decryption, nothing else.
pub struct AeadKey {
    key: LessSafeKey,
}

impl AeadKey {
    /// A fresh random key.
    pub fn generate() -> Result<Self, SeedVaultError> {
        let mut raw = Zeroizing::new([0u8; KEY_LEN]);
        fill_random(raw.as_mut())?;
        Self::from_bytes(&raw)
    }

    /// Build a key from raw bytes. The caller owns (and wipes) `bytes`.
    pub(crate) fn from_bytes(bytes: &[u8; KEY_LEN]) -> Result<Self, SeedVaultError> {
        let unbound = UnboundKey::new(&AES_256_GCM, bytes)
            .map_err(|_| SeedVaultError::Crypto("failed to create AES-256-GCM key".into()))?;
        Ok(Self {
            key: LessSafeKey::new(unbound),
        })
    }
}

impl std::fmt::Debug for AeadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AeadKey")
            .field("algorithm", &"AES-256-GCM")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Ciphertext (with appended tag) and the IV it was sealed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; IV_LEN],
}

/// Fill `buf` from the system CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<(), SeedVaultError> {
    SystemRandom::new()
        .fill(buf)
        .map_err(|_| SeedVaultError::Crypto("system random number generator failed".into()))
}

/// `N` bytes from the system CSPRNG.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], SeedVaultError> {
    let mut buf = [0u8; N];
    fill_random(&mut buf)?;
    Ok(buf)
}

/// Encrypt `plaintext` under `key` with a fresh random IV.
pub fn encrypt(plaintext: &[u8], key: &AeadKey) -> Result<Sealed, SeedVaultError> {
    let iv = random_bytes::<IV_LEN>()?;

    let mut in_out = Vec::with_capacity(plaintext.len() + TAG_LEN);
    in_out.extend_from_slice(plaintext);
    key.key
        .seal_in_place_append_tag(Nonce::assume_unique_for_key(iv), Aad::empty(), &mut in_out)
        .map_err(|_| SeedVaultError::Crypto("AES-256-GCM encryption failed".into()))?;

    Ok(Sealed {
        ciphertext: in_out,
        iv,
    })
}

/// Decrypt and authenticate `ciphertext` (tag appended).
///
/// Fails with [`SeedVaultError::Crypto`] on a tag mismatch, meaning a wrong
/// key or modified data. The two cases are indistinguishable.
pub fn decrypt(
    ciphertext: &[u8],
    iv: &[u8; IV_LEN],
    key: &AeadKey,
) -> Result<Zeroizing<Vec<u8>>, SeedVaultError> {
    let mut in_out = Zeroizing::new(ciphertext.to_vec());
    let len = key
        .key
        .open_in_place(
            Nonce::assume_unique_for_key(*iv),
            Aad::empty(),
            in_out.as_mut_slice(),
        )
        .map_err(|_| SeedVaultError::Crypto("AES-256-GCM authentication failed".into()))?
        .len();
    in_out.truncate(len);
    Ok(in_out)
}

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(digest(&SHA256, data).as_ref());
    out
}

/// Constant-time equality. Slices of different length compare unequal.
pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
