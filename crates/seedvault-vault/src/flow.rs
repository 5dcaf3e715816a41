// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Save, unlock, and forget: the manager and the store working together.

use secrecy::SecretString;
use seedvault_core::{SeedVaultError, WalletAddress};
use tracing::info;

use crate::manager::KeyManager;
use crate::store::VaultStore;

/// Seal the resident secret under `password` and persist it with its address.
pub async fn save_wallet(
    manager: &KeyManager,
    store: &VaultStore,
    password: &SecretString,
) -> Result<WalletAddress, SeedVaultError> {
    let address = manager.address().ok_or(SeedVaultError::NoKeyLoaded)?;
    let vault = manager.create_vault(password).await?;
    store.persist(&vault, &address).await?;
    Ok(address)
}

/// Unlock the saved wallet, if there is one.
///
/// `Ok(None)` means nothing is saved (or storage could not be read). A vault
/// from another format version fails with
/// [`SeedVaultError::VaultVersionUnsupported`] and stays saved.
pub async fn unlock_saved_wallet(
    manager: &KeyManager,
    store: &VaultStore,
    password: &SecretString,
) -> Result<Option<WalletAddress>, SeedVaultError> {
    let Some(vault) = store.load().await? else {
        info!("no saved wallet found");
        return Ok(None);
    };
    manager.initialize_from_vault(&vault, password).await.map(Some)
}

/// Destroy the in-memory key, then delete the saved wallet.
pub async fn forget_wallet(manager: &KeyManager, store: &VaultStore) -> Result<(), SeedVaultError> {
    manager.destroy();
    store.remove().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use seedvault_config::model::VaultConfig;
    use seedvault_core::{LockState, StorageAdapter};
    use seedvault_storage::MemoryStorage;
    use seedvault_test_utils::MockSigner;

    use super::*;

    const SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

    fn manager() -> KeyManager {
        KeyManager::new(Arc::new(MockSigner::new()), &VaultConfig::default()).with_fast_kdf()
    }

    fn password() -> SecretString {
        SecretString::from("correct-horse-battery")
    }

    #[tokio::test]
    async fn save_then_unlock_in_a_new_manager() {
        let store = VaultStore::new(Arc::new(MemoryStorage::new()));
        let first = manager();
        let address = first.initialize_session_only(SEED.into()).await.unwrap();

        assert_eq!(save_wallet(&first, &store, &password()).await.unwrap(), address);
        assert_eq!(store.saved_address().await, Some(address.clone()));

        let second = manager();
        let unlocked = unlock_saved_wallet(&second, &store, &password()).await.unwrap();
        assert_eq!(unlocked, Some(address));
        assert_eq!(second.state(), LockState::Unlocked);
    }

    #[tokio::test]
    async fn save_without_key_is_no_key_loaded() {
        let store = VaultStore::new(Arc::new(MemoryStorage::new()));
        let err = save_wallet(&manager(), &store, &password()).await.unwrap_err();
        assert!(matches!(err, SeedVaultError::NoKeyLoaded));
        assert!(!store.has_saved().await);
    }

    #[tokio::test]
    async fn weak_password_saves_nothing() {
        let store = VaultStore::new(Arc::new(MemoryStorage::new()));
        let manager = manager();
        manager.initialize_session_only(SEED.into()).await.unwrap();

        let err = save_wallet(&manager, &store, &SecretString::from("short"))
            .await
            .unwrap_err();
        assert!(matches!(err, SeedVaultError::WeakPassword { .. }));
        assert!(!store.has_saved().await);
    }

    #[tokio::test]
    async fn unlock_with_nothing_saved_is_none() {
        let store = VaultStore::new(Arc::new(MemoryStorage::new()));
        let manager = manager();
        assert_eq!(unlock_saved_wallet(&manager, &store, &password()).await.unwrap(), None);
        assert_eq!(manager.state(), LockState::Empty);
    }

    #[tokio::test]
    async fn unlock_of_newer_vault_fails_and_keeps_it() {
        let storage = Arc::new(MemoryStorage::new());
        let newer = r#"{"version":2,"salt":"00","iv":"11","ciphertext":"22","mac":"33"}"#;
        storage.put(crate::store::VAULT_KEY, newer).await.unwrap();
        let store = VaultStore::new(storage.clone());
        let manager = manager();

        let err = unlock_saved_wallet(&manager, &store, &password()).await.unwrap_err();
        assert!(matches!(err, SeedVaultError::VaultVersionUnsupported(2)));
        assert_eq!(manager.state(), LockState::Empty);
        assert!(store.has_saved().await);
    }

    #[tokio::test]
    async fn forget_clears_memory_and_storage() {
        let store = VaultStore::new(Arc::new(MemoryStorage::new()));
        let manager = manager();
        manager.initialize_session_only(SEED.into()).await.unwrap();
        save_wallet(&manager, &store, &password()).await.unwrap();

        forget_wallet(&manager, &store).await.unwrap();

        assert!(!manager.has_key());
        assert!(!store.has_saved().await);
        assert_eq!(unlock_saved_wallet(&manager, &store, &password()).await.unwrap(), None);
    }
}
