// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ephemeral session key that wraps the resident secret.
//!
//! A [`SessionKey`] is a shared, revocable handle. Clones observe the same
//! revocation, so an operation that captured the handle before `lock()` or
//! `destroy()` fails instead of decrypting with key material that should be
//! gone.

use std::sync::{Arc, RwLock};

use seedvault_core::SeedVaultError;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{self, AeadKey, IV_LEN};

/// Why a session key stopped working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revocation {
    /// The manager was locked; the wrapped secret stays resident.
    Locked,
    /// The manager was destroyed or re-initialized with another secret.
    Destroyed,
}

impl Revocation {
    fn into_error(self) -> SeedVaultError {
        match self {
            Self::Locked => SeedVaultError::WalletLocked,
            Self::Destroyed => SeedVaultError::NoKeyLoaded,
        }
    }
}

enum Slot {
    Live(AeadKey),
    Revoked(Revocation),
}

/// Secret ciphertext and IV under a session key. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionWrapped {
    ciphertext: Vec<u8>,
    iv: [u8; IV_LEN],
}

impl std::fmt::Debug for SessionWrapped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionWrapped")
            .field("len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

/// Non-extractable, revocable AES-256-GCM session key.
#[derive(Clone)]
pub struct SessionKey {
    slot: Arc<RwLock<Slot>>,
}

impl SessionKey {
    /// A fresh random session key.
    pub fn generate() -> Result<Self, SeedVaultError> {
        Ok(Self {
            slot: Arc::new(RwLock::new(Slot::Live(AeadKey::generate()?))),
        })
    }

    /// Wrap `plaintext` under this key.
    pub fn seal(&self, plaintext: &[u8]) -> Result<SessionWrapped, SeedVaultError> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        match &*slot {
            Slot::Live(key) => {
                let sealed = crypto::encrypt(plaintext, key)?;
                Ok(SessionWrapped {
                    ciphertext: sealed.ciphertext,
                    iv: sealed.iv,
                })
            }
            Slot::Revoked(reason) => Err(reason.into_error()),
        }
    }

    /// Unwrap into a fresh buffer owned by the caller.
    ///
    /// Fails with [`SeedVaultError::WalletLocked`] or
    /// [`SeedVaultError::NoKeyLoaded`] once the key has been revoked.
    pub fn open(&self, wrapped: &SessionWrapped) -> Result<Zeroizing<Vec<u8>>, SeedVaultError> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        match &*slot {
            Slot::Live(key) => crypto::decrypt(&wrapped.ciphertext, &wrapped.iv, key).map_err(|_| {
                SeedVaultError::Internal("resident secret failed authentication".into())
            }),
            Slot::Revoked(reason) => Err(reason.into_error()),
        }
    }

    /// Drop the key material. Every clone of this handle becomes unusable.
    ///
    /// A later `Destroyed` overrides `Locked`, never the reverse.
    pub fn revoke(&self, reason: Revocation) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        if !matches!(*slot, Slot::Revoked(Revocation::Destroyed)) {
            *slot = Slot::Revoked(reason);
        }
    }

    pub fn is_revoked(&self) -> bool {
        matches!(
            *self.slot.read().unwrap_or_else(|e| e.into_inner()),
            Slot::Revoked(_)
        )
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKey")
            .field("key", &"[REDACTED]")
            .field("revoked", &self.is_revoked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_open_roundtrip() {
        let key = SessionKey::generate().unwrap();
        let wrapped = key.seal(b"snoPBrXtMeMyMHUVTgbuqAfg1SUTb").unwrap();
        assert_eq!(key.open(&wrapped).unwrap().as_slice(), b"snoPBrXtMeMyMHUVTgbuqAfg1SUTb");
    }

    #[test]
    fn each_open_returns_an_independent_buffer() {
        let key = SessionKey::generate().unwrap();
        let wrapped = key.seal(b"secret").unwrap();

        let mut first = key.open(&wrapped).unwrap();
        let second = key.open(&wrapped).unwrap();
        first.zeroize();

        assert_eq!(second.as_slice(), b"secret");
    }

    #[test]
    fn revoked_clone_reports_lock_reason() {
        let key = SessionKey::generate().unwrap();
        let captured = key.clone();
        let wrapped = key.seal(b"secret").unwrap();

        key.revoke(Revocation::Locked);

        assert!(captured.is_revoked());
        assert!(matches!(captured.open(&wrapped), Err(SeedVaultError::WalletLocked)));
        assert!(matches!(captured.seal(b"x"), Err(SeedVaultError::WalletLocked)));
    }

    #[test]
    fn destroyed_key_reports_no_key_loaded() {
        let key = SessionKey::generate().unwrap();
        let wrapped = key.seal(b"secret").unwrap();
        key.revoke(Revocation::Destroyed);
        assert!(matches!(key.open(&wrapped), Err(SeedVaultError::NoKeyLoaded)));
    }

    #[test]
    fn destroy_after_lock_upgrades_the_reason() {
        let key = SessionKey::generate().unwrap();
        let wrapped = key.seal(b"secret").unwrap();
        key.revoke(Revocation::Locked);
        key.revoke(Revocation::Destroyed);
        assert!(matches!(key.open(&wrapped), Err(SeedVaultError::NoKeyLoaded)));

        key.revoke(Revocation::Locked);
        assert!(matches!(key.open(&wrapped), Err(SeedVaultError::NoKeyLoaded)));
    }

    #[test]
    fn ciphertext_from_another_session_is_rejected() {
        let a = SessionKey::generate().unwrap();
        let b = SessionKey::generate().unwrap();
        let wrapped = a.seal(b"secret").unwrap();
        assert!(matches!(b.open(&wrapped), Err(SeedVaultError::Internal(_))));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = SessionKey::generate().unwrap();
        let wrapped = key.seal(b"secret").unwrap();
        assert!(format!("{key:?}").contains("[REDACTED]"));
        assert!(!format!("{wrapped:?}").contains("secret"));
    }
}
