// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key-value storage for the Seedvault key manager.
//!
//! [`SqliteStorage`] keeps entries in a single `kv_store` table behind a
//! `tokio-rusqlite` connection (one background thread serializes every
//! write). [`MemoryStorage`] is a process-local stand-in for ephemeral use.

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use memory::MemoryStorage;
