use anyhow::{Result, anyhow};
use colored::Colorize;
use serde::Serialize;
use syllabuzz_core::{AppClient, ClientError, InteractionKey, ToggleOutcome, ViewScope};
use syllabuzz_models::InteractionKind;

use super::action_error;
use crate::output::{OutputFormat, json::print_json};

#[derive(Serialize)]
struct InteractionView {
    kind: InteractionKind,
    object_id: String,
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<bool>,
}

pub async fn status(client: &AppClient, key: InteractionKey, format: OutputFormat) -> Result<()> {
    let scope = ViewScope::new();
    let active = client
        .interactions
        .status(&key, &scope)
        .await
        .unwrap_or(false);

    if format.is_json() {
        return print_json(&InteractionView {
            kind: key.kind,
            object_id: key.object_id,
            active,
            confirmed: None,
        });
    }
    println!("{}", describe(&key, active));
    if !client.auth.is_authenticated() {
        println!("{}", "Log in to see your own status.".dimmed());
    }
    Ok(())
}

/// Flip a relation: read the current value, toggle it and wait for the server.
pub async fn toggle(
    client: &AppClient,
    key: InteractionKey,
    context: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let scope = ViewScope::new();
    client.interactions.status(&key, &scope).await;

    let handle = match client.interactions.toggle(&key, context) {
        ToggleOutcome::Started(handle) => handle,
        ToggleOutcome::AuthRequired => return Err(ClientError::AuthRequired.into()),
        ToggleOutcome::Ignored { .. } => {
            return Err(anyhow!("A change to {key} is already in progress"));
        }
    };

    let result = handle.settled().await;
    if let Some(err) = result.error {
        return Err(action_error(err, action_name(key.kind)));
    }
    if !result.confirmed {
        return Err(anyhow!("The server did not accept the change to {key}"));
    }

    if format.is_json() {
        return print_json(&InteractionView {
            kind: key.kind,
            object_id: key.object_id,
            active: result.active,
            confirmed: Some(result.confirmed),
        });
    }
    println!("{}", describe(&key, result.active));
    Ok(())
}

fn action_name(kind: InteractionKind) -> &'static str {
    match kind {
        InteractionKind::Bookmark => "Bookmark",
        InteractionKind::Star => "Star",
        InteractionKind::Like => "Like",
    }
}

fn describe(key: &InteractionKey, active: bool) -> String {
    let state = match (key.kind, active) {
        (InteractionKind::Bookmark, true) => "saved".green(),
        (InteractionKind::Bookmark, false) => "not saved".dimmed(),
        (InteractionKind::Star, true) => "starred".yellow(),
        (InteractionKind::Star, false) => "not starred".dimmed(),
        (InteractionKind::Like, true) => "liked".green(),
        (InteractionKind::Like, false) => "not liked".dimmed(),
    };
    format!("{} {}: {state}", key.kind.object_noun(), key.object_id)
}
