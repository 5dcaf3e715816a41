// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owned secret buffers that wipe themselves on drop.
//!
//! [`SecretBuffer`] is the only type that ever carries plaintext wallet
//! secrets across crate boundaries. It cannot be cloned or copied, its
//! `Debug` output is redacted, and its bytes are overwritten with random
//! data and then zeroed (spare capacity included) when it is dropped.

use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SeedVaultError;

/// Overwrite a buffer with fresh random bytes, then with zeros.
///
/// Best-effort hygiene: if the OS RNG is unavailable the random pass is
/// skipped, the zeroing pass always runs.
pub fn secure_wipe(buf: &mut [u8]) {
    let _ = OsRng.try_fill_bytes(buf);
    buf.zeroize();
}

/// A heap buffer holding plaintext secret material.
///
/// The contents are guaranteed to be valid UTF-8. The buffer never grows
/// after construction, so the bytes are never reallocated behind the
/// caller's back.
pub struct SecretBuffer {
    bytes: Vec<u8>,
}

impl SecretBuffer {
    /// Take ownership of a string without copying it.
    pub fn from_string(value: String) -> Self {
        Self {
            bytes: value.into_bytes(),
        }
    }

    /// Take ownership of raw bytes. Non-UTF-8 input is wiped and rejected.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SeedVaultError> {
        let buffer = Self { bytes };
        if std::str::from_utf8(&buffer.bytes).is_err() {
            // `buffer` is wiped by Drop on return.
            return Err(SeedVaultError::InvalidSecretFormat);
        }
        Ok(buffer)
    }

    /// Return a new buffer without leading/trailing whitespace.
    ///
    /// The original buffer is wiped when it is dropped here.
    pub fn trimmed(self) -> Self {
        let trimmed = self.expose_str().trim();
        if trimmed.len() == self.bytes.len() {
            return self;
        }
        Self {
            bytes: trimmed.as_bytes().to_vec(),
        }
    }

    /// Borrow the secret as text.
    pub fn expose_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    /// Borrow the secret as raw bytes.
    pub fn expose_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<String> for SecretBuffer {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<&str> for SecretBuffer {
    fn from(value: &str) -> Self {
        Self::from_string(value.to_string())
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        secure_wipe(&mut self.bytes);
        // Clears the Vec and zeroes the full capacity.
        self.bytes.zeroize();
    }
}

impl ZeroizeOnDrop for SecretBuffer {}

impl std::fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("bytes", &"[REDACTED]")
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_wipe_zeroes_buffer() {
        let mut buf = *b"family seed material";
        secure_wipe(&mut buf);
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[test]
    fn debug_output_is_redacted() {
        let secret = SecretBuffer::from("sn3nxiW7v8KXzPzAqzyHXbSSKNuN9");
        let rendered = format!("{secret:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sn3nxiW7v8KXzPzAqzyHXbSSKNuN9"));
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        let result = SecretBuffer::from_bytes(vec![0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(SeedVaultError::InvalidSecretFormat)));
    }

    #[test]
    fn trimmed_strips_whitespace() {
        let secret = SecretBuffer::from("  abc def \n").trimmed();
        assert_eq!(secret.expose_str(), "abc def");
        assert_eq!(secret.len(), 7);
    }

    #[test]
    fn trimmed_keeps_untouched_buffer() {
        let secret = SecretBuffer::from("abc").trimmed();
        assert_eq!(secret.expose_bytes(), b"abc");
    }

    #[test]
    fn from_string_exposes_same_text() {
        let secret = SecretBuffer::from_string("hello".to_string());
        assert_eq!(secret.expose_str(), "hello");
        assert!(!secret.is_empty());
    }
}
