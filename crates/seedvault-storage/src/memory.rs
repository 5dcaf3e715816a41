// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local storage. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use seedvault_core::{AdapterType, HealthStatus, PluginAdapter, SeedVaultError, StorageAdapter};

/// In-memory key-value storage backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SeedVaultError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn initialize(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SeedVaultError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), SeedVaultError> {
        // A single write guard makes the batch atomic for readers.
        self.entries.write().await.extend(entries);
        Ok(())
    }

    async fn delete_many(&self, keys: Vec<String>) -> Result<(), SeedVaultError> {
        let mut map = self.entries.write().await;
        for key in &keys {
            map.remove(key);
        }
        Ok(())
    }
}
