// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for durable key-value persistence (SQLite, memory).

use async_trait::async_trait;

use crate::error::SeedVaultError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for durable, origin-scoped key-value storage.
///
/// Values are opaque strings. Multi-entry writes and deletes are atomic:
/// either every entry is applied or none is.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), SeedVaultError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), SeedVaultError>;

    /// Reads one value.
    async fn get(&self, key: &str) -> Result<Option<String>, SeedVaultError>;

    /// Writes several entries atomically, overwriting existing values.
    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), SeedVaultError>;

    /// Deletes several keys atomically. Missing keys are ignored.
    async fn delete_many(&self, keys: Vec<String>) -> Result<(), SeedVaultError>;

    /// Writes a single entry.
    async fn put(&self, key: &str, value: &str) -> Result<(), SeedVaultError> {
        self.put_many(vec![(key.to_string(), value.to_string())])
            .await
    }
}
