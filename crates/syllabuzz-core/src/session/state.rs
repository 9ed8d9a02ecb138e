use crate::credential::CredentialStore;
use crate::error::Result;
use crate::navigation::{Navigator, Route};
use parking_lot::RwLock;
use std::sync::Arc;
use syllabuzz_models::User;

#[derive(Debug, Default)]
struct SessionInner {
    credential: Option<String>,
    identity: Option<User>,
    /// Bumped on every credential or identity change.
    epoch: u64,
}

/// Shared session context: who is logged in and with which credential.
///
/// One instance exists per client. The HTTP facade reads the credential from
/// it, the interaction resolver tags cached state with its epoch, and the
/// session store is the only writer apart from [`SessionState::invalidate`].
pub struct SessionState {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    inner: RwLock<SessionInner>,
}

impl SessionState {
    pub fn new(store: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            inner: RwLock::new(SessionInner::default()),
        }
    }

    pub fn credential(&self) -> Option<String> {
        self.inner.read().credential.clone()
    }

    pub fn identity(&self) -> Option<User> {
        self.inner.read().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().identity.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.inner.read().epoch
    }

    /// Credential and epoch read under one lock.
    pub fn snapshot(&self) -> (Option<String>, u64) {
        let inner = self.inner.read();
        (inner.credential.clone(), inner.epoch)
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }

    pub(crate) fn load_persisted(&self) -> Result<Option<String>> {
        self.store.load()
    }

    /// Use a persisted credential for the identity check of a resume.
    pub(crate) fn adopt_credential(&self, token: String) {
        let mut inner = self.inner.write();
        inner.credential = Some(token);
        inner.identity = None;
        inner.epoch += 1;
    }

    pub(crate) fn set_identity(&self, user: User) {
        let mut inner = self.inner.write();
        inner.identity = Some(user);
        inner.epoch += 1;
    }

    /// Persist a fresh credential and install its identity.
    pub(crate) fn install(&self, token: String, user: User) -> Result<()> {
        self.store.save(&token)?;
        let mut inner = self.inner.write();
        inner.credential = Some(token);
        inner.identity = Some(user);
        inner.epoch += 1;
        Ok(())
    }

    /// Forget the credential and identity, in memory and on disk.
    pub(crate) fn clear(&self) {
        {
            let mut inner = self.inner.write();
            inner.credential = None;
            inner.identity = None;
            inner.epoch += 1;
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "Failed to clear persisted credential");
        }
    }

    /// React to a rejected credential observed by a request started at `observed_epoch`.
    ///
    /// Only the first report for an epoch clears the session and redirects to
    /// the login view; reports from requests that started before the session
    /// changed are ignored. Returns true if this call performed the reaction.
    pub fn invalidate(&self, observed_epoch: u64) -> bool {
        {
            let mut inner = self.inner.write();
            if inner.epoch != observed_epoch {
                return false;
            }
            inner.credential = None;
            inner.identity = None;
            inner.epoch += 1;
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "Failed to clear persisted credential");
        }
        tracing::info!(epoch = observed_epoch, "Credential rejected by server, redirecting to login");
        self.navigator.navigate(Route::login());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::MemoryCredentialStore;
    use crate::navigation::RecordingNavigator;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            modules: Vec::new(),
            username: None,
        }
    }

    #[test]
    fn test_invalidate_only_once_per_epoch() {
        let store = Arc::new(MemoryCredentialStore::with_token("tok"));
        let navigator = Arc::new(RecordingNavigator::new());
        let state = SessionState::new(store.clone(), navigator.clone());
        state.install("tok".to_string(), user()).unwrap();

        let epoch = state.epoch();
        assert!(state.invalidate(epoch));
        assert!(!state.invalidate(epoch));
        assert!(!state.invalidate(epoch));

        assert_eq!(navigator.login_redirects(), 1);
        assert!(state.credential().is_none());
        assert!(!state.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_every_change_bumps_epoch() {
        let state = SessionState::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(RecordingNavigator::new()),
        );
        let start = state.epoch();
        state.adopt_credential("tok".to_string());
        state.set_identity(user());
        state.clear();
        assert_eq!(state.epoch(), start + 3);
    }
}
