// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seedvault import | unlock | sign | remove` implementations.
//!
//! Each command takes already-acquired input so it can run without a
//! terminal; prompting happens in `main`.

use secrecy::SecretString;
use seedvault_core::{SecretBuffer, SeedVaultError, SignedTransaction, WalletAddress};
use seedvault_vault::{KeyManager, VaultStore, forget_wallet, save_wallet, unlock_saved_wallet};
use tracing::info;

/// Load `secret`, seal it under `password`, and save it, replacing any
/// previously saved wallet.
pub async fn run_import(
    manager: &KeyManager,
    store: &VaultStore,
    secret: SecretBuffer,
    password: &SecretString,
) -> Result<WalletAddress, SeedVaultError> {
    let address = manager.initialize_session_only(secret).await?;
    if let Err(e) = save_wallet(manager, store, password).await {
        manager.destroy();
        return Err(e);
    }
    info!(%address, "wallet imported");
    Ok(address)
}

/// Unlock the saved wallet. `None` when nothing is saved.
pub async fn run_unlock(
    manager: &KeyManager,
    store: &VaultStore,
    password: &SecretString,
) -> Result<Option<WalletAddress>, SeedVaultError> {
    unlock_saved_wallet(manager, store, password).await
}

/// Parse a transaction argument. Done before any password prompt.
pub fn parse_transaction(tx: &str) -> Result<serde_json::Value, SeedVaultError> {
    let value: serde_json::Value = serde_json::from_str(tx)
        .map_err(|e| SeedVaultError::InvalidInput(format!("transaction is not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(SeedVaultError::InvalidInput(
            "transaction must be a JSON object".to_string(),
        ));
    }
    Ok(value)
}

/// Unlock the saved wallet and sign `tx_json` with it.
pub async fn run_sign(
    manager: &KeyManager,
    store: &VaultStore,
    password: &SecretString,
    tx_json: &serde_json::Value,
) -> Result<SignedTransaction, SeedVaultError> {
    if unlock_saved_wallet(manager, store, password).await?.is_none() {
        return Err(SeedVaultError::NoKeyLoaded);
    }
    manager.sign_transaction(tx_json).await
}

/// Forget the wallet in memory and on disk. Requires explicit confirmation.
pub async fn run_remove(
    manager: &KeyManager,
    store: &VaultStore,
    confirmed: bool,
) -> Result<(), SeedVaultError> {
    if !confirmed {
        return Err(SeedVaultError::InvalidInput(
            "refusing to remove the saved wallet without --yes".to_string(),
        ));
    }
    forget_wallet(manager, store).await?;
    info!("saved wallet removed");
    Ok(())
}
