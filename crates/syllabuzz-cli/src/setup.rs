use anyhow::Result;
use std::sync::Arc;
use syllabuzz_core::{AppClient, ClientConfig};

use crate::cli::Cli;
use crate::terminal::{TerminalNavigator, TerminalNotifier};

pub fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = ClientConfig::load()?;
    Ok(match &cli.api_url {
        Some(api_url) => config.with_api_url(api_url.clone()),
        None => config,
    })
}

/// Build the client and restore any stored session.
pub async fn prepare_client(config: ClientConfig) -> Result<AppClient> {
    let client = AppClient::builder(config)
        .navigator(Arc::new(TerminalNavigator))
        .notifier(Arc::new(TerminalNotifier))
        .build()?;

    if let Some(user) = client.auth.resume().await {
        tracing::debug!(user_id = %user.id, "Using stored session");
    }
    Ok(client)
}
