use std::sync::Arc;

use clap::Parser;

use octoscout::app::App;
use octoscout::cli::{Cli, CliCommand, build_client};
use octoscout::config::load_config;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize tracing (logs to stderr if RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // No subcommand or explicit `tui` → launch the interactive TUI.
        None | Some(CliCommand::Tui) => run_tui().await,
        // All other subcommands → non-interactive JSONL output.
        Some(cmd) => octoscout::cli::run_command(cmd).await,
    }
}

/// Launch the interactive TUI.
async fn run_tui() -> color_eyre::Result<()> {
    let config = load_config();
    let client = Arc::new(build_client(&config)?);

    let terminal = ratatui::init();
    let result = App::new(config, client).run(terminal).await;
    ratatui::restore();
    result
}
