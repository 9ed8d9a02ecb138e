//! Syllabuzz Core - client library for the Syllabuzz content service.
//!
//! This crate holds everything a Syllabuzz front end needs apart from
//! rendering:
//! - Session store (login, logout, resume, password flows)
//! - HTTP client facade with process-wide handling of rejected credentials
//! - Interaction resolver for bookmarks, stars and likes with optimistic
//!   updates and rollback
//! - Catalog API, bookmark pagination and form validation
//!
//! Front ends plug in through two seams: a [`navigation::Navigator`] that
//! performs view changes and a [`notify::Notifier`] that shows transient
//! notices.

pub mod bookmarks;
pub mod catalog;
pub mod config;
pub mod credential;
pub mod error;
pub mod forms;
pub mod http;
pub mod interaction;
pub mod navigation;
pub mod notify;
pub mod session;

pub use syllabuzz_models as models;
pub use syllabuzz_storage::paths;

pub use bookmarks::{BOOKMARK_PAGE_SIZE, BookmarkPager};
pub use catalog::{ArticleQuery, CatalogService};
pub use config::ClientConfig;
pub use credential::{CredentialStore, MemoryCredentialStore, RedbCredentialStore};
pub use error::{ClientError, Result};
pub use http::ApiClient;
pub use interaction::{
    HttpInteractionBackend, InteractionBackend, InteractionKey, InteractionPhase,
    InteractionResolver, InteractionUpdate, ToggleOutcome, ToggleResult, ViewScope,
};
pub use navigation::{LogNavigator, Navigator, Route};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use session::{SessionState, SessionStore};

use std::sync::Arc;
use syllabuzz_storage::Storage;

/// Fully wired client: one session shared by every service.
#[derive(Clone)]
pub struct AppClient {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub auth: SessionStore,
    pub interactions: InteractionResolver,
    pub catalog: CatalogService,
}

impl AppClient {
    pub fn builder(config: ClientConfig) -> AppClientBuilder {
        AppClientBuilder::new(config)
    }

    pub fn session(&self) -> &Arc<SessionState> {
        self.api.session()
    }

    pub fn bookmark_pager(&self) -> BookmarkPager {
        BookmarkPager::new(self.catalog.clone())
    }
}

pub struct AppClientBuilder {
    config: ClientConfig,
    credentials: Option<Arc<dyn CredentialStore>>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    backend: Option<Arc<dyn InteractionBackend>>,
}

impl AppClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            credentials: None,
            navigator: Arc::new(LogNavigator),
            notifier: Arc::new(TracingNotifier),
            backend: None,
        }
    }

    /// Defaults to the redb database in the configured data directory.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Defaults to the REST backend.
    pub fn interaction_backend(mut self, backend: Arc<dyn InteractionBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<AppClient> {
        let credentials = match self.credentials {
            Some(store) => store,
            None => {
                let dir = self.config.resolve_data_dir()?;
                let storage = Storage::new(paths::database_path_in(dir))?;
                Arc::new(RedbCredentialStore::new(storage.credentials)) as Arc<dyn CredentialStore>
            }
        };

        let session = Arc::new(SessionState::new(credentials, self.navigator));
        let api = ApiClient::new(&self.config, session.clone())?;
        let backend = match self.backend {
            Some(backend) => backend,
            None => Arc::new(HttpInteractionBackend::new(api.clone())) as Arc<dyn InteractionBackend>,
        };

        tracing::debug!(api_url = %api.base_url(), "Client ready");
        Ok(AppClient {
            auth: SessionStore::new(api.clone()),
            interactions: InteractionResolver::new(backend, session, self.notifier),
            catalog: CatalogService::new(api.clone()),
            api,
            config: self.config,
        })
    }
}
