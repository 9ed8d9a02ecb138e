pub mod auth;
pub mod catalog;
pub mod interaction;

use anyhow::Result;
use syllabuzz_core::{AppClient, ClientError, InteractionKey};

use crate::cli::Commands;
use crate::output::OutputFormat;

pub async fn run(client: AppClient, command: Commands, format: OutputFormat) -> Result<()> {
    let view = command.view_path();
    match command {
        // Handled before the client is built.
        Commands::Completions { .. } => Ok(()),
        Commands::Login(args) => auth::login(&client, args, format).await,
        Commands::Logout => auth::logout(&client, format).await,
        Commands::Signup(args) => auth::signup(&client, args, format).await,
        Commands::Whoami => auth::whoami(&client, &view, format),
        Commands::ForgotPassword { email } => auth::forgot_password(&client, &email, format).await,
        Commands::ResetPassword { token, password } => {
            auth::reset_password(&client, &token, password, format).await
        }
        Commands::VerifyToken { token } => auth::verify_token(&client, &token, format).await,
        Commands::Modules => catalog::modules(&client, format).await,
        Commands::Module {
            id,
            recommendations,
        } => catalog::module(&client, &id, recommendations, format).await,
        Commands::Articles(args) => catalog::articles(&client, args, format).await,
        Commands::Relevant(args) => catalog::relevant(&client, args, format).await,
        Commands::Trending { days, limit } => catalog::trending(&client, days, limit, format).await,
        Commands::Search { query, limit, skip } => {
            catalog::search(&client, &query, limit, skip, format).await
        }
        Commands::Recommended { limit } => catalog::recommended(&client, &view, limit, format).await,
        Commands::Bookmarks { page } => catalog::bookmarks(&client, &view, page, format).await,
        Commands::Starred => catalog::starred(&client, &view, format).await,
        Commands::Open { article_id, module } => {
            catalog::open(&client, &article_id, module, format).await
        }
        Commands::Bookmark(args) => {
            interaction::toggle(&client, InteractionKey::bookmark(args.article_id), args.module, format)
                .await
        }
        Commands::Like(args) => {
            interaction::toggle(&client, InteractionKey::like(args.article_id), args.module, format)
                .await
        }
        Commands::Star { module_id } => {
            interaction::toggle(&client, InteractionKey::star(module_id), None, format).await
        }
        Commands::Status { kind, id } => {
            interaction::status(&client, InteractionKey::new(kind, id), format).await
        }
    }
}

/// Attach the action name to fallback messages ("Login failed ...").
pub(crate) fn action_error(err: ClientError, action: &str) -> anyhow::Error {
    let message = err.user_message(action);
    match err {
        ClientError::Transient { .. } => ClientError::Transient { message }.into(),
        ClientError::Validation { status, .. } => ClientError::Validation { status, message }.into(),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_fills_empty_rejection() {
        let err = action_error(
            ClientError::Validation {
                status: 500,
                message: String::new(),
            },
            "Bookmark",
        );
        assert_eq!(err.to_string(), "Bookmark failed");
    }

    #[test]
    fn test_action_error_keeps_server_message() {
        let err = action_error(
            ClientError::Validation {
                status: 400,
                message: "Article already bookmarked".to_string(),
            },
            "Bookmark",
        );
        assert_eq!(err.to_string(), "Article already bookmarked");

        let err = action_error(ClientError::transient(), "Star");
        assert_eq!(err.to_string(), "Star failed. Please check your connection.");
    }
}
