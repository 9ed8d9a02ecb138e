use super::types::InteractionKey;
use crate::error::Result;
use crate::http::ApiClient;
use async_trait::async_trait;
use syllabuzz_models::{
    BookmarkRequest, InteractionKind, LikeRequest, StarRequest, StatusResponse, ToggleResponse,
};

/// Server side of the interaction state.
#[async_trait]
pub trait InteractionBackend: Send + Sync {
    /// Whether the relation is active for the current user.
    async fn status(&self, key: &InteractionKey) -> Result<bool>;

    /// Activate or deactivate the relation. Returns the server's success flag.
    ///
    /// `context` is the module an article was opened from, when known.
    async fn set(&self, key: &InteractionKey, active: bool, context: Option<&str>) -> Result<bool>;
}

/// [`InteractionBackend`] over the REST API.
#[derive(Clone)]
pub struct HttpInteractionBackend {
    api: ApiClient,
}

impl HttpInteractionBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn collection_path(kind: InteractionKind) -> &'static str {
    match kind {
        InteractionKind::Bookmark => "/auth/bookmark",
        InteractionKind::Star => "/auth/star-module",
        InteractionKind::Like => "/auth/like",
    }
}

fn item_path(key: &InteractionKey) -> String {
    format!("{}/{}", collection_path(key.kind), key.object_id)
}

#[async_trait]
impl InteractionBackend for HttpInteractionBackend {
    async fn status(&self, key: &InteractionKey) -> Result<bool> {
        let response: StatusResponse = self
            .api
            .get(format!("{}/status", item_path(key)))
            .send()
            .await?;
        Ok(response.active)
    }

    async fn set(&self, key: &InteractionKey, active: bool, context: Option<&str>) -> Result<bool> {
        let request = if active {
            let module_id = context.map(str::to_string);
            let post = self.api.post(collection_path(key.kind));
            match key.kind {
                InteractionKind::Bookmark => post.json(&BookmarkRequest {
                    article_id: key.object_id.clone(),
                    module_id,
                }),
                InteractionKind::Like => post.json(&LikeRequest {
                    article_id: key.object_id.clone(),
                    module_id,
                }),
                InteractionKind::Star => post.json(&StarRequest {
                    module_id: key.object_id.clone(),
                }),
            }
        } else {
            self.api.delete(item_path(key))
        };

        let response: ToggleResponse = request.send().await?;
        if !response.success {
            tracing::debug!(
                key = %key,
                message = ?response.message,
                "Server declined interaction change"
            );
        }
        Ok(response.success)
    }
}
