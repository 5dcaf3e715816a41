// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local Ed25519 signing adapter.
//!
//! Implements `SigningAdapter` by deriving an Ed25519 keypair from the wallet
//! secret for the duration of each call. Transactions are signed over their
//! canonical JSON encoding (keys sorted) with `SigningPubKey` filled in; the
//! signature is attached as `TxnSignature`.

pub mod keypair;

pub use ed25519_dalek::Signature;
pub use keypair::WalletKeypair;

use async_trait::async_trait;
use sha2::{Digest, Sha512};
use tracing::debug;

use seedvault_core::{
    AdapterType, HealthStatus, PluginAdapter, SecretBuffer, SeedVaultError, SignedTransaction,
    SigningAdapter, WalletAddress,
};

/// Field carrying the signer's public key.
pub const SIGNING_PUB_KEY: &str = "SigningPubKey";
/// Field carrying the hex signature.
pub const TXN_SIGNATURE: &str = "TxnSignature";

/// Signing adapter backed by Ed25519 keys derived from the wallet secret.
#[derive(Debug, Default)]
pub struct Ed25519Signer;

impl Ed25519Signer {
    pub fn new() -> Self {
        Self
    }
}

fn signing_error(message: impl Into<String>) -> SeedVaultError {
    SeedVaultError::Signing {
        message: message.into(),
    }
}

fn canonical_bytes(value: &serde_json::Value) -> Result<Vec<u8>, SeedVaultError> {
    serde_json::to_vec(value).map_err(|e| signing_error(format!("unserializable transaction: {e}")))
}

/// The transaction id: first half of SHA-512 over the signed blob.
fn transaction_hash(blob: &[u8]) -> String {
    let digest = Sha512::digest(blob);
    hex::encode_upper(&digest[..32])
}

/// Check that `tx_blob` carries a valid signature by its own `SigningPubKey`.
pub fn verify_transaction(signed: &SignedTransaction) -> Result<(), SeedVaultError> {
    let blob = hex::decode(&signed.tx_blob).map_err(|e| signing_error(format!("malformed blob: {e}")))?;
    if transaction_hash(&blob) != signed.hash {
        return Err(signing_error("transaction hash does not match blob"));
    }

    let mut tx: serde_json::Value =
        serde_json::from_slice(&blob).map_err(|e| signing_error(format!("malformed blob: {e}")))?;
    let fields = tx
        .as_object_mut()
        .ok_or_else(|| signing_error("transaction must be a JSON object"))?;
    let signature = fields
        .remove(TXN_SIGNATURE)
        .and_then(|v| v.as_str().map(str::to_owned))
        .ok_or_else(|| signing_error("transaction is not signed"))?;
    let public = fields
        .get(SIGNING_PUB_KEY)
        .and_then(|v| v.as_str())
        .ok_or_else(|| signing_error("transaction has no signing key"))?
        .to_owned();

    let mut sig_bytes = [0u8; 64];
    hex::decode_to_slice(&signature, &mut sig_bytes)
        .map_err(|e| signing_error(format!("malformed signature: {e}")))?;
    keypair::verify_strict(&public, &canonical_bytes(&tx)?, &Signature::from_bytes(&sig_bytes))
}

#[async_trait]
impl PluginAdapter for Ed25519Signer {
    fn name(&self) -> &str {
        "ed25519"
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
impl SigningAdapter for Ed25519Signer {
    async fn derive_address(&self, secret: &SecretBuffer) -> Result<WalletAddress, SeedVaultError> {
        Ok(WalletKeypair::from_secret(secret)?.address())
    }

    async fn sign(
        &self,
        secret: &SecretBuffer,
        tx_json: &serde_json::Value,
    ) -> Result<SignedTransaction, SeedVaultError> {
        let mut tx = tx_json.clone();
        let fields = tx
            .as_object_mut()
            .ok_or_else(|| signing_error("transaction must be a JSON object"))?;
        if fields.contains_key(TXN_SIGNATURE) {
            return Err(signing_error("transaction is already signed"));
        }

        let keypair = WalletKeypair::from_secret(secret)?;
        fields.insert(SIGNING_PUB_KEY.into(), keypair.public_hex().into());

        let signature = keypair.sign(&canonical_bytes(&tx)?);
        if let Some(fields) = tx.as_object_mut() {
            fields.insert(
                TXN_SIGNATURE.into(),
                hex::encode_upper(signature.to_bytes()).into(),
            );
        }

        let blob = canonical_bytes(&tx)?;
        let hash = transaction_hash(&blob);
        debug!(%hash, "transaction signed");
        Ok(SignedTransaction {
            tx_blob: hex::encode_upper(blob),
            hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

    fn payment() -> serde_json::Value {
        serde_json::json!({
            "TransactionType": "Payment",
            "Destination": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "Amount": "1000000",
            "Fee": "12",
            "Sequence": 7,
        })
    }

    #[test]
    fn adapter_name_and_type() {
        let signer = Ed25519Signer::new();
        assert_eq!(signer.name(), "ed25519");
        assert_eq!(signer.adapter_type(), AdapterType::Signing);
    }

    #[tokio::test]
    async fn health_check_healthy() {
        let health = Ed25519Signer::new().health_check().await.unwrap();
        assert_eq!(health, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn derive_address_is_deterministic() {
        let signer = Ed25519Signer::new();
        let a = signer.derive_address(&FAMILY_SEED.into()).await.unwrap();
        let b = signer.derive_address(&FAMILY_SEED.into()).await.unwrap();
        assert_eq!(a, b);
        assert!(a.as_str().starts_with('r'));
    }

    #[tokio::test]
    async fn signed_transaction_verifies() {
        let signer = Ed25519Signer::new();
        let signed = signer.sign(&FAMILY_SEED.into(), &payment()).await.unwrap();

        assert_eq!(signed.hash.len(), 64);
        verify_transaction(&signed).unwrap();

        let blob: serde_json::Value =
            serde_json::from_slice(&hex::decode(&signed.tx_blob).unwrap()).unwrap();
        assert_eq!(blob["Amount"], "1000000");
        assert!(blob[SIGNING_PUB_KEY].as_str().unwrap().starts_with("ED"));
        assert_eq!(blob[TXN_SIGNATURE].as_str().unwrap().len(), 128);
    }

    #[tokio::test]
    async fn signing_is_deterministic() {
        let signer = Ed25519Signer::new();
        let a = signer.sign(&FAMILY_SEED.into(), &payment()).await.unwrap();
        let b = signer.sign(&FAMILY_SEED.into(), &payment()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn tampered_blob_fails_verification() {
        let signer = Ed25519Signer::new();
        let signed = signer.sign(&FAMILY_SEED.into(), &payment()).await.unwrap();

        let mut tx: serde_json::Value =
            serde_json::from_slice(&hex::decode(&signed.tx_blob).unwrap()).unwrap();
        tx["Amount"] = "9999999".into();
        let blob = serde_json::to_vec(&tx).unwrap();
        let forged = SignedTransaction {
            tx_blob: hex::encode_upper(&blob),
            hash: transaction_hash(&blob),
        };

        assert!(verify_transaction(&forged).is_err());
    }

    #[tokio::test]
    async fn non_object_transaction_is_rejected() {
        let signer = Ed25519Signer::new();
        let result = signer
            .sign(&FAMILY_SEED.into(), &serde_json::json!(["Payment"]))
            .await;
        assert!(matches!(result, Err(SeedVaultError::Signing { .. })));
    }

    #[tokio::test]
    async fn already_signed_transaction_is_rejected() {
        let signer = Ed25519Signer::new();
        let mut tx = payment();
        tx[TXN_SIGNATURE] = "00".into();
        let result = signer.sign(&FAMILY_SEED.into(), &tx).await;
        assert!(matches!(result, Err(SeedVaultError::Signing { .. })));
    }
}
