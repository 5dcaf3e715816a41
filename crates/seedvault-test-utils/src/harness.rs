// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete wallet stack: a temp SQLite database
//! behind a [`VaultStore`], a [`KeyManager`] driving a [`MockSigner`], and the
//! configuration both were built from.

use std::sync::Arc;

use seedvault_config::model::{SeedvaultConfig, StorageConfig, VaultConfig};
use seedvault_core::{SeedVaultError, SigningAdapter, StorageAdapter};
use seedvault_storage::SqliteStorage;
use seedvault_vault::{KeyManager, VaultStore};

use crate::mock_signer::MockSigner;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    min_password_length: Option<usize>,
    signer: Option<Arc<MockSigner>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            min_password_length: None,
            signer: None,
        }
    }

    /// Override the minimum vault password length.
    pub fn with_min_password_length(mut self, min: usize) -> Self {
        self.min_password_length = Some(min);
        self
    }

    /// Use a specific mock signer, e.g. a rejecting or gated one.
    pub fn with_signer(mut self, signer: MockSigner) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, SeedVaultError> {
        let temp_dir = tempfile::TempDir::new().map_err(SeedVaultError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let config = SeedvaultConfig {
            vault: VaultConfig {
                min_password_length: self
                    .min_password_length
                    .unwrap_or_else(|| VaultConfig::default().min_password_length),
            },
            storage: StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
                wal_mode: true,
            },
            ..SeedvaultConfig::default()
        };

        let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
        storage.initialize().await?;

        let signer = self.signer.unwrap_or_else(|| Arc::new(MockSigner::new()));
        let manager = Arc::new(KeyManager::new(
            Arc::clone(&signer) as Arc<dyn SigningAdapter>,
            &config.vault,
        ));
        let store = VaultStore::new(Arc::clone(&storage) as Arc<dyn StorageAdapter>);

        Ok(TestHarness {
            signer,
            storage,
            store,
            manager,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with a mock signer and temp storage.
pub struct TestHarness {
    /// The mock signing adapter shared by every manager this harness hands out.
    pub signer: Arc<MockSigner>,
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    /// Vault persistence over `storage`.
    pub store: VaultStore,
    /// The key manager under test.
    pub manager: Arc<KeyManager>,
    /// Configuration the stack was built from.
    pub config: SeedvaultConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A new, empty key manager over the same signer and config.
    ///
    /// Stands in for a process restart: the database survives, memory does not.
    pub fn fresh_manager(&self) -> Arc<KeyManager> {
        Arc::new(KeyManager::new(
            Arc::clone(&self.signer) as Arc<dyn SigningAdapter>,
            &self.config.vault,
        ))
    }
}
