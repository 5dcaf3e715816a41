// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and migrations.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use seedvault_core::SeedVaultError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// An open, migrated SQLite database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at `path` and apply pending migrations.
    ///
    /// The parent directory is created when missing. `:memory:` opens a
    /// private in-memory database.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, SeedVaultError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()
                .await
                .map_err(SeedVaultError::storage)?
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(SeedVaultError::storage)?;
            }
            Connection::open(path).await.map_err(SeedVaultError::storage)?
        };

        let journal = if wal_mode { "WAL" } else { "DELETE" };
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = {journal};
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;"
            ))
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| crate::migrations::run_migrations(conn))
            .await
            .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened and migrated");
        Ok(Self { conn })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), SeedVaultError> {
        checkpoint(&self.conn).await?;
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Truncating WAL checkpoint; a no-op for rollback-journal databases.
pub(crate) async fn checkpoint(conn: &Connection) -> Result<(), SeedVaultError> {
    conn.call(|conn| -> Result<(), rusqlite::Error> {
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
    })
    .await
    .map_err(map_tr_err)
}

/// Map a tokio-rusqlite error into [`SeedVaultError::StorageUnavailable`].
pub(crate) fn map_tr_err<E>(err: tokio_rusqlite::Error<E>) -> SeedVaultError
where
    E: std::fmt::Debug + std::fmt::Display,
{
    SeedVaultError::storage(format!("database error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_kv_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("vault.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();
        assert!(path.exists());

        let tables: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn wal_mode_is_applied() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wal.db");
        let db = Database::open(path.to_str().unwrap(), true).await.unwrap();

        let mode: String = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn reopening_does_not_rerun_migrations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let path = path.to_str().unwrap();

        Database::open(path, false).await.unwrap().close().await.unwrap();
        let db = Database::open(path, false).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn opening_a_directory_is_storage_unavailable() {
        let dir = tempdir().unwrap();
        let result = Database::open(dir.path().to_str().unwrap(), true).await;
        assert!(matches!(
            result,
            Err(SeedVaultError::StorageUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn in_memory_database_opens() {
        let db = Database::open(":memory:", false).await.unwrap();
        db.close().await.unwrap();
    }
}
