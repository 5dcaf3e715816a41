// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-protected secret vault and session key manager.
//!
//! A wallet secret is wrapped the moment it arrives under an ephemeral
//! AES-256-GCM session key that never leaves this crate. For durable storage
//! it is re-sealed under a PBKDF2-HMAC-SHA256 password-derived key into an
//! [`EncryptedVault`]. Plaintext only exists in self-wiping
//! [`SecretBuffer`](seedvault_core::SecretBuffer)s, lent to the signing
//! adapter for one call at a time.

pub mod crypto;
pub mod envelope;
pub mod flow;
pub mod format;
pub mod global;
pub mod kdf;
pub mod lifecycle;
pub mod manager;
pub mod prompt;
pub mod session;
pub mod store;

pub use envelope::{EncryptedVault, VAULT_VERSION, open_vault, seal_vault};
pub use flow::{forget_wallet, save_wallet, unlock_saved_wallet};
pub use global::{init_key_manager, key_manager};
pub use lifecycle::LifecycleHooks;
pub use manager::KeyManager;
pub use store::VaultStore;
