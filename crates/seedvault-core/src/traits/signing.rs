// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signing adapter trait for ledger-specific address derivation and signing.

use async_trait::async_trait;

use crate::error::SeedVaultError;
use crate::secret::SecretBuffer;
use crate::traits::adapter::PluginAdapter;
use crate::types::{SignedTransaction, WalletAddress};

/// Ledger-specific collaborator that is allowed to see plaintext secrets.
///
/// The key manager lends the secret for the duration of a single call and
/// wipes it as soon as the call returns. Implementations must not retain
/// the borrowed secret or any value derived from it beyond the call.
#[async_trait]
pub trait SigningAdapter: PluginAdapter {
    /// Derives the public address controlled by `secret`.
    ///
    /// Returns an error if the secret is well-formed but not usable
    /// (bad checksum, unsupported key type).
    async fn derive_address(&self, secret: &SecretBuffer) -> Result<WalletAddress, SeedVaultError>;

    /// Signs a JSON transaction with `secret`.
    async fn sign(
        &self,
        secret: &SecretBuffer,
        tx_json: &serde_json::Value,
    ) -> Result<SignedTransaction, SeedVaultError>;
}
