use super::SessionState;
use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use crate::navigation::Route;
use std::sync::Arc;
use syllabuzz_models::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest,
    SignupRequest, SignupResponse, User, UserEnvelope,
};

/// Session operations against the backend's `/auth` endpoints.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<SessionState>,
    api: ApiClient,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: api.session().clone(),
            api,
        }
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn identity(&self) -> Option<User> {
        self.state.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn credential(&self) -> Option<String> {
        self.state.credential()
    }

    /// Restore the session from the persisted credential.
    ///
    /// Best effort: any failure leaves the session empty and the persisted
    /// credential cleared. Never returns an error.
    pub async fn resume(&self) -> Option<User> {
        let token = match self.state.load_persisted() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read persisted credential");
                self.state.clear();
                return None;
            }
        };

        self.state.adopt_credential(token);
        match self
            .api
            .get("/auth/me")
            .allow_unauthorized()
            .send::<UserEnvelope>()
            .await
        {
            Ok(envelope) => {
                tracing::debug!(user_id = %envelope.user.id, "Session resumed");
                self.state.set_identity(envelope.user.clone());
                Some(envelope.user)
            }
            Err(err) => {
                tracing::info!(error = %err, "Stored credential rejected, clearing session");
                self.state.clear();
                None
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On failure the session is left untouched and the server's message is
    /// returned as-is. Navigation is left to the caller.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<User> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            return Err(ClientError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        let response: LoginResponse = self
            .api
            .post("/auth/login")
            .json(&LoginRequest {
                email: identifier.to_string(),
                password: secret.to_string(),
            })
            .allow_unauthorized()
            .send()
            .await?;

        self.state.install(response.token, response.user.clone())?;
        tracing::info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    /// End the session. The backend call is best effort; local state is
    /// always cleared and the user is sent to the login view.
    pub async fn logout(&self) {
        if self.state.credential().is_some()
            && let Err(err) = self
                .api
                .post("/auth/logout")
                .allow_unauthorized()
                .send_discard()
                .await
        {
            tracing::debug!(error = %err, "Logout call failed, clearing session anyway");
        }

        self.state.clear();
        self.state.navigate(Route::login());
    }

    /// Register a new account, then send the user to the login view.
    pub async fn signup(&self, name: &str, email: &str, secret: &str) -> Result<SignupResponse> {
        let response: SignupResponse = self
            .api
            .post("/auth/signup")
            .json(&SignupRequest {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: secret.to_string(),
            })
            .allow_unauthorized()
            .send()
            .await?;

        self.state.navigate(Route::Login {
            return_to: None,
            registered: true,
        });
        Ok(response)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<String> {
        let response: MessageResponse = self
            .api
            .post("/auth/forgot-password")
            .json(&ForgotPasswordRequest {
                email: email.trim().to_string(),
            })
            .allow_unauthorized()
            .send()
            .await?;
        Ok(response.message)
    }

    pub async fn reset_password(&self, token: &str, secret: &str) -> Result<String> {
        let response: MessageResponse = self
            .api
            .post("/auth/reset-password")
            .json(&ResetPasswordRequest {
                token: token.to_string(),
                password: secret.to_string(),
            })
            .allow_unauthorized()
            .send()
            .await?;
        Ok(response.message)
    }

    pub async fn verify_reset_token(&self, token: &str) -> Result<String> {
        let response: MessageResponse = self
            .api
            .get("/auth/verify-reset-token")
            .query("token", token)
            .allow_unauthorized()
            .send()
            .await?;
        Ok(response.message)
    }

    /// Identity for a protected view.
    ///
    /// Without one, the user is sent to the login view with `return_to` as the
    /// post-login destination and [`ClientError::AuthRequired`] is returned.
    pub fn require_identity(&self, return_to: &str) -> Result<User> {
        match self.state.identity() {
            Some(user) => Ok(user),
            None => {
                self.state.navigate(Route::login_returning_to(return_to));
                Err(ClientError::AuthRequired)
            }
        }
    }
}
