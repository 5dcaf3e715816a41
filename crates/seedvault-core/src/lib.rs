// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Seedvault key manager.
//!
//! This crate provides the error taxonomy, the secret-holding buffer type,
//! common types, and the adapter traits for the collaborators the key
//! manager depends on (signing and storage).

pub mod error;
pub mod secret;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SeedVaultError;
pub use secret::{SecretBuffer, secure_wipe};
pub use types::{AdapterType, HealthStatus, LockState, SignedTransaction, WalletAddress};

pub use traits::{PluginAdapter, SigningAdapter, StorageAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_type_has_two_variants() {
        use std::str::FromStr;

        let variants = [AdapterType::Signing, AdapterType::Storage];

        // Verify Display and FromStr round-trip for all variants.
        for variant in &variants {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn lock_state_renders_lowercase() {
        assert_eq!(LockState::Unlocked.to_string(), "unlocked");
        assert_eq!(
            serde_json::to_string(&LockState::Locked).unwrap(),
            "\"locked\""
        );
    }

    #[test]
    fn wallet_address_serializes_as_plain_string() {
        let addr = WalletAddress("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".into());
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh\"");
        assert_eq!(addr.to_string(), addr.as_str());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_signing_adapter<T: SigningAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
    }

    mod props {
        use proptest::prelude::*;

        use crate::SecretBuffer;

        proptest! {
            #[test]
            fn secret_buffer_preserves_text(text in ".{0,64}") {
                let buffer = SecretBuffer::from(text.as_str());
                prop_assert_eq!(buffer.expose_str(), text.as_str());
                prop_assert_eq!(buffer.len(), text.len());
            }
        }
    }
}
