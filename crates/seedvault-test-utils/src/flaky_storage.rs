// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage whose reads and writes can be made to fail on demand.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use seedvault_core::{AdapterType, HealthStatus, PluginAdapter, SeedVaultError, StorageAdapter};
use seedvault_storage::MemoryStorage;

/// Wraps [`MemoryStorage`] with switchable failure injection.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `get` fail with `StorageUnavailable` while `on`.
    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    /// Make every `put_many`/`delete_many` fail with `StorageUnavailable` while `on`.
    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), SeedVaultError> {
        if flag.load(Ordering::SeqCst) {
            return Err(SeedVaultError::storage(format!("injected {what} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for FlakyStorage {
    fn name(&self) -> &str {
        "flaky-memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SeedVaultError> {
        if self.fail_reads.load(Ordering::SeqCst) || self.fail_writes.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Degraded("failure injection active".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for FlakyStorage {
    async fn initialize(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SeedVaultError> {
        Self::check(&self.fail_reads, "read")?;
        self.inner.get(key).await
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), SeedVaultError> {
        Self::check(&self.fail_writes, "write")?;
        self.inner.put_many(entries).await
    }

    async fn delete_many(&self, keys: Vec<String>) -> Result<(), SeedVaultError> {
        Self::check(&self.fail_writes, "write")?;
        self.inner.delete_many(keys).await
    }
}
