//! Syllabuzz Storage - persistent client state
//!
//! This crate provides the on-disk state of the Syllabuzz client, using redb
//! as the embedded database. The browser version kept a single token in local
//! storage; here the same single entry lives in the `credentials` table.
//!
//! # Tables
//!
//! - `credentials` - The bearer credential of the current session

pub mod credential;
pub mod paths;
mod simple_storage;

use anyhow::Result;
use redb::Database;
use std::path::Path;
use std::sync::Arc;

pub use credential::{AUTH_TOKEN_KEY, CredentialStorage};
pub use simple_storage::SimpleStorage;

/// Central storage manager that opens the database and its tables.
pub struct Storage {
    pub credentials: CredentialStorage,
}

impl Storage {
    /// Open (or create) the storage database at the given path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Arc::new(Database::create(path)?);
        let credentials = CredentialStorage::new(db)?;

        tracing::debug!(path = %path.display(), "Opened client storage");
        Ok(Self { credentials })
    }
}
