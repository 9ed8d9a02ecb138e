//! Error taxonomy for the Syllabuzz client.

use thiserror::Error;

/// Fallback shown when the backend is unreachable.
pub const CONNECTION_MESSAGE: &str = "Request failed. Please check your connection.";

/// Client error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A mutating action was attempted without a logged-in identity.
    #[error("Authentication required")]
    AuthRequired,

    /// The server rejected the credential.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Network or connectivity failure.
    #[error("{message}")]
    Transient { message: String },

    /// Server-side rejection; the message is the server's, verbatim, and
    /// empty when the response carried none.
    #[error("{}", rejection_text(.status, .message))]
    Validation { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl ClientError {
    pub fn transient() -> Self {
        Self::Transient {
            message: CONNECTION_MESSAGE.to_string(),
        }
    }

    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// HTTP status of a server rejection, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Message to show a user for a failed `action` (e.g. "Login").
    ///
    /// Server-provided messages win. Without one the fallback is
    /// "`<action>` failed", or "`<action>` failed. Please check your
    /// connection." when the server never answered.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Validation { message, .. } | Self::Unauthorized { message }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            Self::Transient { .. } => format!("{action} failed. Please check your connection."),
            Self::AuthRequired => self.to_string(),
            Self::InvalidInput(message) => message.clone(),
            _ => format!("{action} failed"),
        }
    }
}

fn rejection_text(status: &u16, message: &str) -> String {
    if message.trim().is_empty() {
        format!("Request failed (status {status})")
    } else {
        message.to_string()
    }
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "Storage error");
        Self::Storage(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::Validation {
            status: 401,
            message: "Invalid email or password".to_string(),
        };
        assert_eq!(err.user_message("Login"), "Invalid email or password");
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(
            ClientError::transient().user_message("Login"),
            "Login failed. Please check your connection."
        );
        let empty = ClientError::Validation {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.user_message("Signup"), "Signup failed");
        assert_eq!(empty.to_string(), "Request failed (status 500)");
        assert_eq!(
            ClientError::Decode("bad json".into()).user_message("Reset"),
            "Reset failed"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(ClientError::AuthRequired.is_auth_required());
        assert!(
            ClientError::Unauthorized {
                message: "expired".into()
            }
            .is_unauthorized()
        );
        assert!(ClientError::transient().is_transient());
        assert_eq!(ClientError::transient().status(), None);
    }
}
