// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the collaborators the key manager relies on.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod signing;
pub mod storage;

pub use adapter::PluginAdapter;
pub use signing::SigningAdapter;
pub use storage::StorageAdapter;
