//! Read-side content API: modules, articles, trending, search, recommendations.
//!
//! Ranking, relevance and trending are all computed by the backend. These are
//! typed pass-throughs.

use crate::error::{ClientError, Result};
use crate::http::ApiClient;
use syllabuzz_models::{
    ActivityType, Article, ArticleEnvelope, ArticlesEnvelope, Bookmark, BookmarksEnvelope, Module,
    ModuleEnvelope, ModulesEnvelope, RecommendationsEnvelope, RecordInteractionRequest,
    SuccessResponse, TrendingEnvelope, User,
};

/// Filters for the article listing.
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    /// Module code or category name.
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

#[derive(Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn modules(&self) -> Result<Vec<Module>> {
        let envelope: ModulesEnvelope = self.api.get("/modules").send().await?;
        Ok(envelope.modules)
    }

    pub async fn module(&self, module_id: &str) -> Result<Module> {
        let envelope: ModuleEnvelope = self
            .api
            .get(format!("/modules/{module_id}"))
            .send()
            .await?;
        Ok(envelope.module)
    }

    pub async fn module_recommendations(
        &self,
        module_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Article>> {
        let mut request = self
            .api
            .get(format!("/modules/{module_id}/recommendations"));
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        let envelope: RecommendationsEnvelope = request.send().await?;
        Ok(envelope.recommendations)
    }

    pub async fn articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let mut request = self.api.get("/articles");
        if let Some(category) = query.category.as_deref().filter(|c| !c.trim().is_empty()) {
            request = request.query("category", category.trim());
        }
        if let Some(limit) = query.limit {
            request = request.query("limit", limit);
        }
        if let Some(skip) = query.skip {
            request = request.query("skip", skip);
        }
        let envelope: ArticlesEnvelope = request.send().await?;
        Ok(envelope.articles)
    }

    pub async fn article(&self, article_id: &str) -> Result<Article> {
        let envelope: ArticleEnvelope = self
            .api
            .get(format!("/articles/{article_id}"))
            .send()
            .await?;
        Ok(envelope.article)
    }

    /// Articles matched to the user's modules.
    pub async fn relevant_articles(&self, limit: u32, skip: u32) -> Result<Vec<Article>> {
        let envelope: ArticlesEnvelope = self
            .api
            .get("/articles/relevant")
            .query("limit", limit)
            .query("skip", skip)
            .send()
            .await?;
        Ok(envelope.articles)
    }

    pub async fn trending(&self, days: Option<u32>, limit: Option<u32>) -> Result<Vec<Article>> {
        let mut request = self.api.get("/trending");
        if let Some(days) = days {
            request = request.query("days", days);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        let envelope: TrendingEnvelope = request.send().await?;
        Ok(envelope.trending)
    }

    /// Full-text search. A blank query is rejected without a call.
    pub async fn search(&self, query: &str, limit: Option<u32>, skip: Option<u32>) -> Result<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::InvalidInput(
                "Search query must not be empty".to_string(),
            ));
        }

        let mut request = self.api.get("/search").query("q", query);
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        if let Some(skip) = skip {
            request = request.query("skip", skip);
        }
        let envelope: ArticlesEnvelope = request.send().await?;
        Ok(envelope.articles)
    }

    pub async fn bookmarks(&self, limit: u32, skip: u32) -> Result<Vec<Bookmark>> {
        self.identity()?;
        let envelope: BookmarksEnvelope = self
            .api
            .get("/auth/bookmarks")
            .query("limit", limit)
            .query("skip", skip)
            .send()
            .await?;
        Ok(envelope.bookmarks)
    }

    pub async fn starred_modules(&self) -> Result<Vec<Module>> {
        self.identity()?;
        let envelope: ModulesEnvelope = self.api.get("/auth/starred-modules").send().await?;
        Ok(envelope.modules)
    }

    /// Personal recommendations for the logged-in user.
    pub async fn user_recommendations(&self, limit: Option<u32>) -> Result<Vec<Article>> {
        let user = self.identity()?;
        let mut request = self.api.get(format!("/recommendations/{}", user.id));
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        let envelope: RecommendationsEnvelope = request.send().await?;
        Ok(envelope.recommendations)
    }

    /// Report that the user opened an article. Best effort; anonymous views
    /// are not recorded.
    pub async fn record_view(&self, article_id: &str, module_id: Option<&str>) -> bool {
        let Some(user) = self.api.session().identity() else {
            return false;
        };

        let request = RecordInteractionRequest {
            user_id: user.id,
            article_id: article_id.to_string(),
            module_id: module_id.map(str::to_string),
            activity: ActivityType::View,
        };
        match self
            .api
            .post("/interaction")
            .json(&request)
            .send::<SuccessResponse>()
            .await
        {
            Ok(response) => response.success,
            Err(err) => {
                tracing::debug!(article_id, error = %err, "Failed to record view");
                false
            }
        }
    }

    fn identity(&self) -> Result<User> {
        self.api
            .session()
            .identity()
            .ok_or(ClientError::AuthRequired)
    }
}
