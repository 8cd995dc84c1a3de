use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::api::GithubClient;
use crate::api::types::Account;
use crate::config::{AppConfig, load_config};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "octoscout", about = "TUI and CLI for exploring GitHub accounts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// Search accounts (JSONL)
    Search {
        /// Search query
        query: String,
    },
    /// Look up an account profile by numeric ID (JSONL)
    User {
        /// GitHub account ID
        id: u64,
    },
    /// List an account's followers (JSONL)
    Followers {
        /// GitHub account ID
        id: u64,
    },
    /// List the accounts an account follows (JSONL)
    Following {
        /// GitHub account ID
        id: u64,
    },
}

// ---------------------------------------------------------------------------
// Client construction (shared with main.rs TUI path)
// ---------------------------------------------------------------------------

/// Build a `GithubClient` from config plus an optional `GITHUB_TOKEN` from
/// the environment or a `.env` file.
pub fn build_client(config: &AppConfig) -> eyre::Result<GithubClient> {
    dotenvy::dotenv().ok();
    let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
    GithubClient::with_base_url(config.api_base_url.clone(), token.as_deref())
        .map_err(|e| eyre!("{e}"))
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

/// Print accounts as JSONL to stdout.
fn print_accounts(accounts: &[Account]) -> eyre::Result<()> {
    for account in accounts {
        let line = serde_json::to_string(account)?;
        println!("{line}");
    }
    Ok(())
}

pub async fn run_command(cmd: CliCommand) -> eyre::Result<()> {
    let config = load_config();
    let client = build_client(&config)?;

    match cmd {
        CliCommand::Tui => {
            unreachable!("tui is handled in main")
        }

        CliCommand::Search { query } => {
            if query.trim().is_empty() {
                return Err(eyre!("search query must not be empty"));
            }
            let accounts = client
                .search_users(&query, config.per_page)
                .await
                .map_err(|e| eyre!("{e}"))?;
            print_accounts(&accounts)?;
        }

        CliCommand::User { id } => {
            let profile = client.get_user(id).await.map_err(|e| eyre!("{e}"))?;
            let line = serde_json::to_string(&profile)?;
            println!("{line}");
        }

        CliCommand::Followers { id } => {
            let accounts = client.get_followers(id).await.map_err(|e| eyre!("{e}"))?;
            print_accounts(&accounts)?;
        }

        CliCommand::Following { id } => {
            let accounts = client.get_following(id).await.map_err(|e| eyre!("{e}"))?;
            print_accounts(&accounts)?;
        }
    }

    Ok(())
}
