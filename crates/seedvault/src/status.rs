// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seedvault status` command implementation.
//!
//! Reports whether a wallet is saved and its display address. Never asks for
//! the password and never decrypts anything.

use std::io::IsTerminal;

use seedvault_vault::VaultStore;
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub saved: bool,
    pub address: Option<String>,
    pub database_path: String,
}

/// Gather the saved-wallet status.
pub async fn collect_status(store: &VaultStore, database_path: &str) -> StatusResponse {
    StatusResponse {
        saved: store.has_saved().await,
        address: store.saved_address().await.map(|a| a.to_string()),
        database_path: database_path.to_string(),
    }
}

/// Run the `seedvault status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(store: &VaultStore, database_path: &str, json: bool, plain: bool) {
    let status = collect_status(store, database_path).await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&status, use_color);
    }
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  seedvault status");
    println!("  {}", "-".repeat(35));

    match (&status.address, status.saved, use_color) {
        (Some(address), true, true) => {
            use colored::Colorize;
            println!("    Wallet:   {} {}", "✓".green(), "saved".green());
            println!("    Address:  {address}");
        }
        (Some(address), true, false) => {
            println!("    Wallet:   [OK] saved");
            println!("    Address:  {address}");
        }
        (None, true, _) => {
            println!("    Wallet:   saved (address unavailable)");
        }
        (_, false, true) => {
            use colored::Colorize;
            println!("    Wallet:   {} {}", "✗".red(), "none saved".red());
        }
        (_, false, false) => {
            println!("    Wallet:   [NONE] none saved");
        }
    }

    println!("    Database: {}", status.database_path);
    println!();
    if !status.saved {
        println!("  Import one with: seedvault import");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use seedvault_test_utils::TestHarness;

    use super::*;

    #[tokio::test]
    async fn empty_store_reports_nothing_saved() {
        let harness = TestHarness::builder().build().await.unwrap();
        let status = collect_status(&harness.store, "test.db").await;
        assert!(!status.saved);
        assert_eq!(status.address, None);
    }

    #[tokio::test]
    async fn saved_wallet_reports_address() {
        let harness = TestHarness::builder().build().await.unwrap();
        let address = crate::commands::run_import(
            &harness.manager,
            &harness.store,
            "snoPBrXtMeMyMHUVTgbuqAfg1SUTb".into(),
            &secrecy::SecretString::from("correct-horse-battery"),
        )
        .await
        .unwrap();

        let status = collect_status(&harness.store, "test.db").await;
        assert!(status.saved);
        assert_eq!(status.address, Some(address.to_string()));
    }

    #[test]
    fn status_response_serializes() {
        let resp = StatusResponse {
            saved: true,
            address: Some("rabc".to_string()),
            database_path: "/tmp/seedvault.db".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"saved\":true"));
        assert!(json.contains("\"address\":\"rabc\""));
    }

    #[test]
    fn status_response_without_wallet_serializes_null_address() {
        let resp = StatusResponse {
            saved: false,
            address: None,
            database_path: "seedvault.db".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"saved\":false"));
        assert!(json.contains("\"address\":null"));
    }
}
