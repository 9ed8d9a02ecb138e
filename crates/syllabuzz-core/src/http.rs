//! HTTP client facade.
//!
//! Every backend call goes through [`ApiClient`]. It attaches the session's
//! bearer credential and turns responses into [`ClientError`] values. A 401 on
//! an ordinary request ends the session process-wide: the credential is
//! cleared and the user is sent to the login view, whichever caller issued
//! the request.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::SessionState;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionState>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionState>) -> Result<Self> {
        let base_url = config.base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| ClientError::Config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn get(&self, path: impl Into<String>) -> ApiRequest<'_> {
        ApiRequest::new(self, Method::GET, path.into())
    }

    pub fn post(&self, path: impl Into<String>) -> ApiRequest<'_> {
        ApiRequest::new(self, Method::POST, path.into())
    }

    pub fn delete(&self, path: impl Into<String>) -> ApiRequest<'_> {
        ApiRequest::new(self, Method::DELETE, path.into())
    }

    /// Absolute URL for an API path such as `/auth/me`.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|err| ClientError::Config(format!("Invalid request path '{path}': {err}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// A request being built against the API.
pub struct ApiRequest<'a> {
    client: &'a ApiClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<std::result::Result<Value, String>>,
    allow_unauthorized: bool,
}

impl<'a> ApiRequest<'a> {
    fn new(client: &'a ApiClient, method: Method, path: String) -> Self {
        Self {
            client,
            method,
            path,
            query: Vec::new(),
            body: None,
            allow_unauthorized: false,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|err| err.to_string()));
        self
    }

    /// Let the caller own the reaction to a 401.
    ///
    /// Used by the session endpoints themselves, where a rejection means
    /// "wrong password" or "stale token", not "log the user out".
    pub fn allow_unauthorized(mut self) -> Self {
        self.allow_unauthorized = true;
        self
    }

    pub async fn send<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.execute().await?;
        if body.trim().is_empty() {
            // Unit-like responses take null, all-default payloads take `{}`.
            return serde_json::from_value(Value::Null)
                .or_else(|_| serde_json::from_value(Value::Object(Default::default())))
                .map_err(|err| ClientError::Decode(err.to_string()));
        }
        serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Send and ignore whatever body comes back.
    pub async fn send_discard(self) -> Result<()> {
        self.execute().await.map(|_| ())
    }

    async fn execute(self) -> Result<String> {
        let session = &self.client.session;
        let (credential, epoch) = session.snapshot();
        let url = self.client.endpoint(&self.path, &self.query)?;

        let mut request = self.client.http.request(self.method.clone(), url);
        if let Some(token) = credential {
            request = request.bearer_auth(token);
        }
        if let Some(body) = self.body {
            let body = body.map_err(|err| ClientError::InvalidInput(format!("Invalid request body: {err}")))?;
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::warn!(method = %self.method, path = %self.path, error = %err, "Request failed");
            ClientError::transient()
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            tracing::warn!(method = %self.method, path = %self.path, error = %err, "Failed to read response");
            ClientError::transient()
        })?;

        if status.is_success() {
            return Ok(text);
        }

        let message = extract_error_message(&text).unwrap_or_default();
        tracing::debug!(
            method = %self.method,
            path = %self.path,
            status = status.as_u16(),
            message = %message,
            "Request rejected"
        );

        if status == StatusCode::UNAUTHORIZED && !self.allow_unauthorized {
            session.invalidate(epoch);
            return Err(ClientError::Unauthorized { message });
        }

        Err(ClientError::Validation {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human readable message out of an error body.
///
/// Looks at `message`, then `error` (either a string or `{ "message": .. }`).
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(message) = value.get("message").and_then(non_empty) {
        return Some(message);
    }
    match value.get("error")? {
        Value::Object(error) => error.get("message").and_then(non_empty),
        other => non_empty(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::MemoryCredentialStore;
    use crate::navigation::RecordingNavigator;

    fn client(api_url: &str) -> ApiClient {
        let session = Arc::new(SessionState::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(RecordingNavigator::new()),
        ));
        ApiClient::new(&ClientConfig::default().with_api_url(api_url), session).unwrap()
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"message": "Invalid email or password"}"#).as_deref(),
            Some("Invalid email or password")
        );
        assert_eq!(
            extract_error_message(r#"{"error": "Token expired"}"#).as_deref(),
            Some("Token expired")
        );
        assert_eq!(
            extract_error_message(r#"{"error": {"code": 400, "message": "Bad input"}}"#).as_deref(),
            Some("Bad input")
        );
        assert_eq!(extract_error_message(r#"{"message": ""}"#), None);
        assert_eq!(extract_error_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_endpoint_joins_base_path() {
        let client = client("http://127.0.0.1:5000/api/");
        let url = client.endpoint("/auth/me", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/auth/me");

        let url = client
            .endpoint(
                "search",
                &[("q".to_string(), "rust & go".to_string())],
            )
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/search?q=rust+%26+go");
    }
}
