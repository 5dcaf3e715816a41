// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the key manager, adapters, and the CLI.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Public ledger address derived from the resident secret.
///
/// Public metadata: safe to log, persist in cleartext, and show before unlock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signed transaction as produced by a signing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Hex-encoded serialized transaction, ready for submission.
    pub tx_blob: String,
    /// Transaction hash (hex).
    pub hash: String,
}

/// Lifecycle state of the key manager.
///
/// `Empty` is also the state reached by `destroy()`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    /// No secret resident.
    Empty,
    /// Secret resident and its session key alive: signing permitted.
    Unlocked,
    /// Secret ciphertext resident, session key discarded.
    Locked,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Signing,
    Storage,
}
