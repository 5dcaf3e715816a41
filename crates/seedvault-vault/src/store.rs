// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence of the single saved vault and its display address.

use std::sync::Arc;

use seedvault_core::{SeedVaultError, StorageAdapter, WalletAddress};
use tracing::{debug, info, warn};

use crate::envelope::{EncryptedVault, VAULT_VERSION};

/// The `version` of a stored envelope, read before the rest is parsed.
///
/// `None` when the value is not a JSON object with an integer version.
fn envelope_version(raw: &str) -> Option<u32> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let version = value.as_object()?.get("version")?.as_u64()?;
    Some(u32::try_from(version).unwrap_or(u32::MAX))
}

/// Storage key holding the vault JSON.
pub const VAULT_KEY: &str = "seedvault.vault";
/// Storage key holding the cleartext display address.
pub const ADDRESS_KEY: &str = "seedvault.address";

/// One saved wallet per device, under fixed storage keys.
///
/// An unreadable backend reads as "nothing saved". Writes and deletes surface
/// [`SeedVaultError::StorageUnavailable`].
#[derive(Clone)]
pub struct VaultStore {
    storage: Arc<dyn StorageAdapter>,
}

impl VaultStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }

    /// Save `vault` and `address`, replacing any previous wallet.
    pub async fn persist(
        &self,
        vault: &EncryptedVault,
        address: &WalletAddress,
    ) -> Result<(), SeedVaultError> {
        let json = vault.to_json()?;
        self.storage
            .put_many(vec![
                (VAULT_KEY.to_string(), json),
                (ADDRESS_KEY.to_string(), address.to_string()),
            ])
            .await?;
        info!(%address, "vault persisted");
        Ok(())
    }

    /// The saved vault, if there is a readable one.
    ///
    /// A read failure reads as "nothing saved". A vault written by another
    /// format version is left in place and reported as
    /// [`SeedVaultError::VaultVersionUnsupported`]. Only a value that is not
    /// a vault envelope at all is treated as corruption: it is deleted along
    /// with its address and `None` is returned.
    pub async fn load(&self) -> Result<Option<EncryptedVault>, SeedVaultError> {
        let raw = match self.storage.get(VAULT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "could not read saved vault; treating as absent");
                return Ok(None);
            }
        };

        let parsed = match envelope_version(&raw) {
            Some(version) if version != VAULT_VERSION => {
                warn!(version, "saved vault uses an unsupported format version; keeping it");
                return Err(SeedVaultError::VaultVersionUnsupported(version));
            }
            Some(_) => EncryptedVault::from_json(&raw).ok(),
            None => None,
        };

        match parsed {
            Some(vault) => {
                debug!(version = vault.version, "saved vault loaded");
                Ok(Some(vault))
            }
            None => {
                warn!("saved vault is corrupted; removing it");
                if let Err(e) = self.remove().await {
                    warn!(error = %e, "failed to remove corrupted vault");
                }
                Ok(None)
            }
        }
    }

    /// Whether a vault entry exists. Does not validate it.
    pub async fn has_saved(&self) -> bool {
        match self.storage.get(VAULT_KEY).await {
            Ok(raw) => raw.is_some(),
            Err(e) => {
                warn!(error = %e, "could not read saved vault; treating as absent");
                false
            }
        }
    }

    /// The display address saved beside the vault. Public metadata.
    pub async fn saved_address(&self) -> Option<WalletAddress> {
        match self.storage.get(ADDRESS_KEY).await {
            Ok(raw) => raw.map(WalletAddress),
            Err(e) => {
                warn!(error = %e, "could not read saved address");
                None
            }
        }
    }

    /// Delete the saved vault and address. Irreversible.
    pub async fn remove(&self) -> Result<(), SeedVaultError> {
        self.storage
            .delete_many(vec![VAULT_KEY.to_string(), ADDRESS_KEY.to_string()])
            .await?;
        info!("saved vault removed");
        Ok(())
    }
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultStore")
            .field("storage", &self.storage.name())
            .finish()
    }
}
