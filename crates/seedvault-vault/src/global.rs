// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide [`KeyManager`].
//!
//! Constructed once through [`init_key_manager`]; there is no way to swap or
//! reset it afterwards. Use [`KeyManager::destroy`] to drop the secret.

use std::sync::{Arc, OnceLock};

use seedvault_config::model::VaultConfig;
use seedvault_core::{SeedVaultError, SigningAdapter};
use tracing::debug;

use crate::manager::KeyManager;

static KEY_MANAGER: OnceLock<Arc<KeyManager>> = OnceLock::new();

/// Create the process-wide key manager. Fails if it already exists.
pub fn init_key_manager(
    signer: Arc<dyn SigningAdapter>,
    config: &VaultConfig,
) -> Result<Arc<KeyManager>, SeedVaultError> {
    let manager = Arc::new(KeyManager::new(signer, config));
    KEY_MANAGER
        .set(Arc::clone(&manager))
        .map_err(|_| SeedVaultError::Internal("key manager already initialized".into()))?;
    debug!("process-wide key manager initialized");
    Ok(manager)
}

/// The process-wide key manager. Fails before [`init_key_manager`].
pub fn key_manager() -> Result<Arc<KeyManager>, SeedVaultError> {
    KEY_MANAGER
        .get()
        .cloned()
        .ok_or_else(|| SeedVaultError::Internal("key manager not initialized".into()))
}
