// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use rusqlite::{OptionalExtension, params};
use tokio::sync::OnceCell;
use tracing::debug;

use seedvault_config::model::StorageConfig;
use seedvault_core::{AdapterType, HealthStatus, PluginAdapter, SeedVaultError, StorageAdapter};

use crate::database::{Database, checkpoint, map_tr_err};

/// SQLite-backed key-value storage.
///
/// The database is lazily opened on the first call to
/// [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, SeedVaultError> {
        self.db
            .get()
            .ok_or_else(|| SeedVaultError::storage("storage not initialized: call initialize() first"))
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SeedVaultError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeedVaultError> {
        if let Some(db) = self.db.get() {
            checkpoint(db.connection()).await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), SeedVaultError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| SeedVaultError::storage("storage already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), SeedVaultError> {
        checkpoint(self.db()?.connection()).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SeedVaultError> {
        let key = key.to_string();
        self.db()?
            .connection()
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), SeedVaultError> {
        let count = entries.len();
        self.db()?
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                         ON CONFLICT(key) DO UPDATE SET
                             value = excluded.value,
                             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                    )?;
                    for (key, value) in &entries {
                        stmt.execute(params![key, value])?;
                    }
                }
                tx.commit()
            })
            .await
            .map_err(map_tr_err)?;
        debug!(count, "stored entries");
        Ok(())
    }

    async fn delete_many(&self, keys: Vec<String>) -> Result<(), SeedVaultError> {
        let count = keys.len();
        self.db()?
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare("DELETE FROM kv_store WHERE key = ?1")?;
                    for key in &keys {
                        stmt.execute(params![key])?;
                    }
                }
                tx.commit()
            })
            .await
            .map_err(map_tr_err)?;
        debug!(count, "deleted entries");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    async fn open_storage(dir: &tempfile::TempDir, name: &str) -> SqliteStorage {
        let db_path = dir.path().join(name);
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir, "double_init.db").await;
        let result = storage.initialize().await;
        assert!(result.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn operations_fail_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert!(storage.health_check().await.is_err());
        let err = storage.get("anything").await.unwrap_err();
        assert!(matches!(err, SeedVaultError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir, "health.db").await;
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn put_get_overwrite_and_delete() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir, "kv.db").await;

        assert_eq!(storage.get("a").await.unwrap(), None);

        storage.put("a", "1").await.unwrap();
        assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("1"));

        storage.put("a", "2").await.unwrap();
        assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("2"));

        storage
            .delete_many(vec!["a".into(), "never-written".into()])
            .await
            .unwrap();
        assert_eq!(storage.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_many_writes_all_entries() {
        let dir = tempdir().unwrap();
        let storage = open_storage(&dir, "many.db").await;

        storage
            .put_many(vec![
                ("vault".into(), "{}".into()),
                ("address".into(), "rAddr".into()),
            ])
            .await
            .unwrap();

        assert_eq!(storage.get("vault").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.get("address").await.unwrap().as_deref(), Some("rAddr"));
    }

    #[tokio::test]
    async fn entries_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let storage = open_storage(&dir, "durable.db").await;
            storage.put("k", "v").await.unwrap();
            storage.shutdown().await.unwrap();
        }
        let storage = open_storage(&dir, "durable.db").await;
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
