// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock signing adapter for deterministic testing.
//!
//! `MockSigner` derives addresses and "signatures" from SHA-256 digests of
//! the secret, so tests can predict its output without real ledger crypto.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Notify;

use seedvault_core::{
    AdapterType, HealthStatus, PluginAdapter, SecretBuffer, SeedVaultError, SignedTransaction,
    SigningAdapter, WalletAddress,
};

/// A signing adapter that records how often it is called.
pub struct MockSigner {
    derive_calls: AtomicUsize,
    sign_calls: AtomicUsize,
    reject: bool,
    derive_gate: Option<Arc<Notify>>,
}

impl MockSigner {
    /// A signer that accepts every secret.
    pub fn new() -> Self {
        Self {
            derive_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
            reject: false,
            derive_gate: None,
        }
    }

    /// A signer that refuses to derive an address from any secret.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    /// A signer whose `derive_address` waits for `gate` to be notified.
    ///
    /// The call is counted before it starts waiting.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            derive_gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn derive_calls(&self) -> usize {
        self.derive_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    /// The address this signer derives for `secret`.
    pub fn address_for(secret: &str) -> WalletAddress {
        let digest = hex::encode(Sha256::digest(secret.as_bytes()));
        WalletAddress(format!("r{}", &digest[..32]))
    }

    /// The transaction this signer produces for `secret` and `tx_json`.
    pub fn expected_signature(secret: &str, tx_json: &serde_json::Value) -> SignedTransaction {
        let tx_bytes = serde_json::to_vec(tx_json).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hasher.update(&tx_bytes);
        SignedTransaction {
            tx_blob: hex::encode(&tx_bytes),
            hash: hex::encode(hasher.finalize()),
        }
    }
}

impl Default for MockSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockSigner {
    fn name(&self) -> &str {
        "mock-signer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Signing
    }

    async fn health_check(&self) -> Result<HealthStatus, SeedVaultError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeedVaultError> {
        Ok(())
    }
}

#[async_trait]
impl SigningAdapter for MockSigner {
    async fn derive_address(&self, secret: &SecretBuffer) -> Result<WalletAddress, SeedVaultError> {
        self.derive_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.derive_gate {
            gate.notified().await;
        }
        if self.reject {
            return Err(SeedVaultError::Signing {
                message: "mock signer rejects every secret".to_string(),
            });
        }
        Ok(Self::address_for(secret.expose_str()))
    }

    async fn sign(
        &self,
        secret: &SecretBuffer,
        tx_json: &serde_json::Value,
    ) -> Result<SignedTransaction, SeedVaultError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::expected_signature(secret.expose_str(), tx_json))
    }
}
