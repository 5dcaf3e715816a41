// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recognizes the textual encodings a wallet secret may arrive in.

use std::sync::LazyLock;

use bip39::{Language, Mnemonic};
use regex::Regex;
use seedvault_core::{SecretBuffer, SeedVaultError};

/// Ledger base58 alphabet.
pub const LEDGER_BASE58_ALPHABET: &str =
    "rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// `s` plus 24 to 34 alphabet characters (29 for secp256k1, 31 for `sEd` seeds).
static FAMILY_SEED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^s[{LEDGER_BASE58_ALPHABET}]{{24,34}}$")).unwrap()
});

static HEX_PRIVATE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(?:00|[Ee][Dd])?[0-9A-Fa-f]{64}$").unwrap());

const MNEMONIC_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Which encoding a secret was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    /// `s…` base58 family seed.
    FamilySeed,
    /// 64 hex digits, optionally `00`/`ED` prefixed.
    HexPrivateKey,
    /// English BIP-39 phrase with a valid checksum.
    Mnemonic,
}

/// Classify `secret` (already trimmed). Returns `None` for anything unrecognized.
pub fn classify(secret: &str) -> Option<SecretKind> {
    if FAMILY_SEED.is_match(secret) {
        Some(SecretKind::FamilySeed)
    } else if HEX_PRIVATE_KEY.is_match(secret) {
        Some(SecretKind::HexPrivateKey)
    } else if is_mnemonic(secret) {
        Some(SecretKind::Mnemonic)
    } else {
        None
    }
}

fn is_mnemonic(secret: &str) -> bool {
    let words = secret.split_whitespace().count();
    if !MNEMONIC_WORD_COUNTS.contains(&words) {
        return false;
    }
    let normalized = canonical_phrase(secret);
    Mnemonic::parse_in_normalized(Language::English, normalized.expose_str()).is_ok()
}

/// Lowercase words joined by single spaces, written straight into a wiped
/// buffer.
///
/// The output is never longer than `secret`, so the string is allocated once
/// and never reallocated.
fn canonical_phrase(secret: &str) -> SecretBuffer {
    let mut phrase = String::with_capacity(secret.len());
    for (i, word) in secret.split_whitespace().enumerate() {
        if i > 0 {
            phrase.push(' ');
        }
        phrase.extend(word.chars().map(|c| c.to_ascii_lowercase()));
    }
    SecretBuffer::from_string(phrase)
}

/// Validate and canonicalize a secret.
///
/// Surrounding whitespace is trimmed; mnemonics are lowercased with single
/// spaces between words. Fails with [`SeedVaultError::InvalidSecretFormat`]
/// without touching any crypto provider or collaborator.
pub fn normalize_secret(secret: SecretBuffer) -> Result<(SecretBuffer, SecretKind), SeedVaultError> {
    let secret = secret.trimmed();
    match classify(secret.expose_str()) {
        Some(SecretKind::Mnemonic) => {
            Ok((canonical_phrase(secret.expose_str()), SecretKind::Mnemonic))
        }
        Some(kind) => Ok((secret, kind)),
        None => Err(SeedVaultError::InvalidSecretFormat),
    }
}
