mod cli;
mod commands;
mod completions;
mod error;
mod output;
mod setup;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return;
    }

    if let Err(err) = run(cli).await {
        error::handle_error(err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = setup::load_config(&cli)?;

    // Logs go to a file so they never mix with command output.
    let log_dir = syllabuzz_core::paths::ensure_logs_dir_in(config.resolve_data_dir()?)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "syllabuzz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    tracing::debug!(api_url = %config.api_url, "Starting syllabuzz");

    let client = setup::prepare_client(config).await?;
    commands::run(client, cli.command, cli.format).await
}
