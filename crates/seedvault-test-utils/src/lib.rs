// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Seedvault integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without a real ledger signer.
//!
//! # Components
//!
//! - [`MockSigner`] - Deterministic signing adapter that counts its calls
//! - [`FlakyStorage`] - In-memory storage with injectable read/write failures
//! - [`TestHarness`] - Temp SQLite database, store, and key manager in one

pub mod flaky_storage;
pub mod harness;
pub mod mock_signer;

pub use flaky_storage::FlakyStorage;
pub use harness::TestHarness;
pub use mock_signer::MockSigner;
