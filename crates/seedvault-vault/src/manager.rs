// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The key manager: holds one wallet secret, wrapped under an ephemeral
//! session key, and lends it to the signing adapter on demand.
//!
//! State machine:
//!
//! ```text
//!   Empty --initialize_session_only / initialize_from_vault--> Unlocked
//!   Unlocked --lock--> Locked --initialize_from_vault--> Unlocked
//!   any --destroy--> Empty
//! ```
//!
//! `lock()` is one-way: the session key is revoked and the resident
//! ciphertext can no longer be opened. Getting back to `Unlocked` takes the
//! saved vault and its password.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard};

use secrecy::{ExposeSecret, SecretString};
use seedvault_config::model::VaultConfig;
use seedvault_core::{
    LockState, SecretBuffer, SeedVaultError, SignedTransaction, SigningAdapter, WalletAddress,
};
use tracing::{debug, info, warn};

use crate::envelope::{self, EncryptedVault};
use crate::format;
use crate::kdf;
use crate::session::{Revocation, SessionKey, SessionWrapped};

/// The secret currently loaded into a manager.
struct Resident {
    wrapped: Arc<SessionWrapped>,
    /// Revoked (never removed) on lock, so a later destroy can still
    /// re-label in-flight failures.
    session: SessionKey,
    address: WalletAddress,
}

#[derive(Default)]
struct State {
    resident: Option<Resident>,
    /// Bumped by `destroy()`. An initialization that started before a
    /// destroy must not install its secret afterwards.
    epoch: u64,
    /// Bumped by `lock()`. Same rule as `epoch`, reported as locked.
    locks: u64,
}

/// Session key manager for a single wallet secret.
///
/// Cheap to share behind an `Arc`; every method takes `&self`. The internal
/// mutex is never held across an `.await`.
pub struct KeyManager {
    signer: Arc<dyn SigningAdapter>,
    min_password_length: usize,
    kdf_iterations: NonZeroU32,
    state: Mutex<State>,
}

impl KeyManager {
    pub fn new(signer: Arc<dyn SigningAdapter>, config: &VaultConfig) -> Self {
        Self {
            signer,
            min_password_length: config.min_password_length,
            kdf_iterations: kdf::PBKDF2_ITERATIONS,
            state: Mutex::new(State::default()),
        }
    }

    /// Cheap KDF for unit tests. Vaults sealed this way only open in tests.
    #[cfg(test)]
    pub(crate) fn with_fast_kdf(mut self) -> Self {
        self.kdf_iterations = NonZeroU32::MIN.saturating_add(999);
        self
    }

    fn guard(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load a plaintext secret and wrap it under a fresh session key.
    ///
    /// The format is checked before any collaborator or crypto call. Replaces
    /// whatever secret was resident before.
    pub async fn initialize_session_only(
        &self,
        secret: SecretBuffer,
    ) -> Result<WalletAddress, SeedVaultError> {
        let (secret, kind) = format::normalize_secret(secret)?;
        let (epoch, locks) = {
            let state = self.guard();
            (state.epoch, state.locks)
        };

        let address = self.signer.derive_address(&secret).await.map_err(|e| {
            debug!(error = %e, adapter = self.signer.name(), "address derivation rejected");
            SeedVaultError::InvalidSecretDerivation
        })?;

        let session = SessionKey::generate()?;
        let wrapped = session.seal(secret.expose_bytes())?;
        drop(secret);

        let previous = {
            let mut state = self.guard();
            if state.epoch != epoch {
                session.revoke(Revocation::Destroyed);
                debug!("key manager destroyed during initialization");
                return Err(SeedVaultError::NoKeyLoaded);
            }
            if state.locks != locks {
                session.revoke(Revocation::Locked);
                debug!("key manager locked during initialization");
                return Err(SeedVaultError::WalletLocked);
            }
            state.resident.replace(Resident {
                wrapped: Arc::new(wrapped),
                session,
                address: address.clone(),
            })
        };
        if let Some(previous) = previous {
            previous.session.revoke(Revocation::Destroyed);
        }

        info!(%address, ?kind, "wallet key loaded");
        Ok(address)
    }

    /// Open a saved vault with `password` and load the recovered secret.
    ///
    /// A wrong password and a vault that fails its checksum both surface as
    /// [`SeedVaultError::InvalidPassword`].
    pub async fn initialize_from_vault(
        &self,
        vault: &EncryptedVault,
        password: &SecretString,
    ) -> Result<WalletAddress, SeedVaultError> {
        let secret = envelope::open_with_iterations(vault, password, self.kdf_iterations)
            .await
            .map_err(|e| {
                if e.is_invalid_password() {
                    SeedVaultError::InvalidPassword
                } else {
                    e
                }
            })?;
        self.initialize_session_only(secret).await
    }

    /// Seal the resident secret under `password` for durable storage.
    pub async fn create_vault(
        &self,
        password: &SecretString,
    ) -> Result<EncryptedVault, SeedVaultError> {
        if password.expose_secret().chars().count() < self.min_password_length {
            return Err(SeedVaultError::WeakPassword {
                min_length: self.min_password_length,
            });
        }

        let secret = self.get_secret_for_signing().await?;
        let vault = envelope::seal_with_iterations(&secret, password, self.kdf_iterations).await?;
        info!("vault created");
        Ok(vault)
    }

    /// Decrypt the resident secret into a buffer owned by the caller.
    ///
    /// Every call decrypts independently. Drop the buffer as soon as it has
    /// been used; it wipes itself.
    pub async fn get_secret_for_signing(&self) -> Result<SecretBuffer, SeedVaultError> {
        let (session, wrapped) = {
            let state = self.guard();
            let resident = state.resident.as_ref().ok_or(SeedVaultError::NoKeyLoaded)?;
            (resident.session.clone(), Arc::clone(&resident.wrapped))
        };

        let mut plaintext = session.open(&wrapped)?;
        SecretBuffer::from_bytes(std::mem::take(&mut *plaintext))
    }

    /// Sign `tx_json` with the resident secret via the signing adapter.
    pub async fn sign_transaction(
        &self,
        tx_json: &serde_json::Value,
    ) -> Result<SignedTransaction, SeedVaultError> {
        let secret = self.get_secret_for_signing().await?;
        let result = self.signer.sign(&secret, tx_json).await;
        drop(secret);

        result.map_err(|e| match e {
            SeedVaultError::Signing { .. } => e,
            other => {
                warn!(error = %other, adapter = self.signer.name(), "signing adapter failed");
                SeedVaultError::Signing {
                    message: other.to_string(),
                }
            }
        })
    }

    /// Revoke the session key. The ciphertext and address stay resident.
    ///
    /// An initialization still in flight when this runs fails with
    /// [`SeedVaultError::WalletLocked`] and installs nothing.
    pub fn lock(&self) {
        let mut state = self.guard();
        state.locks = state.locks.wrapping_add(1);
        if let Some(resident) = state.resident.as_ref()
            && !resident.session.is_revoked()
        {
            resident.session.revoke(Revocation::Locked);
            info!(address = %resident.address, "wallet locked");
        }
    }

    /// Revoke the session key and wipe the resident ciphertext and address.
    pub fn destroy(&self) {
        let previous = {
            let mut state = self.guard();
            state.epoch = state.epoch.wrapping_add(1);
            state.resident.take()
        };
        if let Some(resident) = previous {
            resident.session.revoke(Revocation::Destroyed);
            info!(address = %resident.address, "wallet key destroyed");
        }
    }

    /// Whether a secret (locked or not) is resident.
    pub fn has_key(&self) -> bool {
        self.guard().resident.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.state() == LockState::Locked
    }

    /// Address of the resident secret, kept while locked.
    pub fn address(&self) -> Option<WalletAddress> {
        self.guard().resident.as_ref().map(|r| r.address.clone())
    }

    pub fn state(&self) -> LockState {
        match self.guard().resident.as_ref() {
            None => LockState::Empty,
            Some(r) if r.session.is_revoked() => LockState::Locked,
            Some(_) => LockState::Unlocked,
        }
    }

    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("state", &self.state())
            .field("address", &self.address())
            .field("signer", &self.signer.name())
            .finish_non_exhaustive()
    }
}
