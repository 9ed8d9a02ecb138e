//! Credential storage - the persisted bearer token.
//!
//! The session keeps exactly one opaque credential under a fixed key. Nothing
//! else about the session is written to disk.

use crate::{SimpleStorage, define_simple_storage};
use anyhow::{Context, Result};

/// Key under which the bearer credential is stored.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

define_simple_storage! {
    /// Persisted bearer credential backed by the `credentials` table.
    pub struct CredentialStorage { table: "credentials" }
}

impl CredentialStorage {
    /// Read the stored credential, if any.
    pub fn load_token(&self) -> Result<Option<String>> {
        let Some(raw) = self.get_raw(AUTH_TOKEN_KEY)? else {
            return Ok(None);
        };
        let token = String::from_utf8(raw).context("Stored credential is not valid UTF-8")?;
        if token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(token))
    }

    /// Replace the stored credential.
    pub fn save_token(&self, token: &str) -> Result<()> {
        self.put_raw(AUTH_TOKEN_KEY, token.as_bytes())
    }

    /// Remove the stored credential. Returns true if one was present.
    pub fn clear_token(&self) -> Result<bool> {
        let existed = self.delete(AUTH_TOKEN_KEY)?;
        if existed {
            tracing::debug!("Cleared persisted credential");
        }
        Ok(existed)
    }
}
