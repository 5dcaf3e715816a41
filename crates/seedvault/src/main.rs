// SPDX-FileCopyrightText: 2026 Seedvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seedvault - a password-protected wallet key vault.
//!
//! This is the binary entry point.

mod commands;
mod status;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use seedvault_config::SeedvaultConfig;
use seedvault_core::{PluginAdapter, SeedVaultError, StorageAdapter};
use seedvault_signer::Ed25519Signer;
use seedvault_storage::SqliteStorage;
use seedvault_vault::{KeyManager, LifecycleHooks, VaultStore, init_key_manager, prompt};

/// Seedvault - a password-protected wallet key vault.
#[derive(Parser, Debug)]
#[command(name = "seedvault", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a wallet secret and save it under a new password.
    Import,
    /// Check the password against the saved wallet.
    Unlock,
    /// Sign a JSON transaction with the saved wallet.
    Sign {
        /// Transaction JSON object.
        #[arg(long)]
        tx: String,
    },
    /// Show whether a wallet is saved.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Delete the saved wallet.
    Remove {
        /// Confirm deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match seedvault_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            seedvault_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &SeedvaultConfig) -> Result<(), SeedVaultError> {
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    let store = VaultStore::new(Arc::clone(&storage) as Arc<dyn StorageAdapter>);

    let result = match command {
        Commands::Status { json, plain } => {
            status::run_status(&store, &config.storage.database_path, json, plain).await;
            Ok(())
        }
        command => {
            let manager = init_key_manager(Arc::new(Ed25519Signer::new()), &config.vault)?;
            let hooks = LifecycleHooks::new(Arc::clone(&manager), &config.session);
            let result = run_wallet_command(command, &manager, &store).await;
            hooks.on_unload();
            result
        }
    };

    storage.shutdown().await?;
    result
}

async fn run_wallet_command(
    command: Commands,
    manager: &KeyManager,
    store: &VaultStore,
) -> Result<(), SeedVaultError> {
    match command {
        Commands::Import => {
            let secret = prompt::read_secret()?;
            let password = prompt::read_new_password()?;
            let address = commands::run_import(manager, store, secret, &password).await?;
            println!("{address}");
        }
        Commands::Unlock => {
            let password = prompt::read_password()?;
            match commands::run_unlock(manager, store, &password).await? {
                Some(address) => println!("{address}"),
                None => println!("no saved wallet"),
            }
        }
        Commands::Sign { tx } => {
            let tx_json = commands::parse_transaction(&tx)?;
            let password = prompt::read_password()?;
            let signed = commands::run_sign(manager, store, &password, &tx_json).await?;
            let out = serde_json::to_string_pretty(&signed)
                .map_err(|e| SeedVaultError::Internal(format!("failed to encode output: {e}")))?;
            println!("{out}");
        }
        Commands::Remove { yes } => {
            commands::run_remove(manager, store, yes).await?;
            println!("saved wallet removed");
        }
        Commands::Status { .. } => {}
    }
    Ok(())
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the config level.
///
/// Logs go to stderr so command output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seedvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sign_requires_tx_flag() {
        assert!(Cli::try_parse_from(["seedvault", "sign"]).is_err());
        let cli = Cli::try_parse_from(["seedvault", "sign", "--tx", "{}"]).unwrap();
        assert!(matches!(cli.command, Commands::Sign { tx } if tx == "{}"));
    }

    #[test]
    fn status_flags_parse() {
        let cli = Cli::try_parse_from(["seedvault", "status", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Status {
                json: true,
                plain: false
            }
        ));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = seedvault_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.vault.min_password_length, 12);
    }
}
