#![allow(dead_code)]

use serde_json::{Value, json};
use std::sync::Arc;
use syllabuzz_core::navigation::RecordingNavigator;
use syllabuzz_core::notify::RecordingNotifier;
use syllabuzz_core::{AppClient, ClientConfig, CredentialStore, MemoryCredentialStore};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub struct TestClient {
    pub server: MockServer,
    pub client: AppClient,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestClient {
    pub fn stored_token(&self) -> Option<String> {
        self.store.load().expect("memory store never fails")
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "modules": ["m1"]
    })
}

pub fn article_json(id: &str) -> Value {
    json!({
        "_id": id,
        "title": format!("Article {id}"),
        "url": format!("https://news.example.com/{id}"),
        "source_name": "Example News",
        "published_at": "2024-03-05T10:00:00Z",
        "type": "news"
    })
}

/// Client against a fresh mock server, with an optional persisted credential.
pub async fn anonymous(token: Option<&str>) -> TestClient {
    let server = MockServer::start().await;
    let store = Arc::new(match token {
        Some(token) => MemoryCredentialStore::with_token(token),
        None => MemoryCredentialStore::new(),
    });
    let navigator = Arc::new(RecordingNavigator::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let config = ClientConfig::default().with_api_url(format!("{}/api", server.uri()));
    let client = AppClient::builder(config)
        .credential_store(store.clone())
        .navigator(navigator.clone())
        .notifier(notifier.clone())
        .build()
        .expect("client builds");

    TestClient {
        server,
        client,
        store,
        navigator,
        notifier,
    }
}

/// Client with a resumed session for `user_json()`.
pub async fn logged_in() -> TestClient {
    let test = anonymous(Some(TOKEN)).await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
        .mount(&test.server)
        .await;

    let user = test.client.auth.resume().await;
    assert!(user.is_some(), "session should resume");
    test
}
