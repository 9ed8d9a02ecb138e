//! Persistence seam for the bearer credential.

use crate::error::Result;
use parking_lot::Mutex;
use syllabuzz_storage::CredentialStorage;

/// Where the session keeps its single opaque credential between runs.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Credential persisted in the redb `credentials` table.
pub struct RedbCredentialStore {
    storage: CredentialStorage,
}

impl RedbCredentialStore {
    pub fn new(storage: CredentialStorage) -> Self {
        Self { storage }
    }
}

impl CredentialStore for RedbCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.storage.load_token()?)
    }

    fn save(&self, token: &str) -> Result<()> {
        Ok(self.storage.save_token(token)?)
    }

    fn clear(&self) -> Result<()> {
        self.storage.clear_token()?;
        Ok(())
    }
}

/// Process-local credential, lost on exit. Used by tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock() = None;
        Ok(())
    }
}
