//! Content documents: modules, articles, bookmarks and their response envelopes.
//!
//! The client treats these as opaque payloads keyed by id. Fields are kept
//! only so the terminal client has something to render.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source category of an article.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArticleType {
    #[default]
    News,
    Academic,
}

impl ArticleType {
    pub fn label(self) -> &'static str {
        match self {
            ArticleType::News => "News",
            ArticleType::Academic => "Academic",
        }
    }
}

/// A curated computer-science module (topic).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A news article or academic paper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "type", default)]
    pub article_type: ArticleType,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

impl Article {
    /// Human readable publication date, e.g. `Mar 5, 2024`.
    pub fn published_label(&self) -> String {
        format_date(&self.published_at)
    }

    /// Relevance as a whole percentage, when the backend scored the article.
    pub fn relevance_percent(&self) -> Option<u32> {
        self.relevance_score
            .filter(|score| score.is_finite() && *score >= 0.0)
            .map(|score| (score * 100.0).round() as u32)
    }

    pub fn summary(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.trim().is_empty() => description,
            _ => "No description available.",
        }
    }
}

/// A saved article together with the bookmark metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    #[serde(default)]
    pub bookmark_id: String,
    pub article: Article,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModulesEnvelope {
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEnvelope {
    pub module: Module,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlesEnvelope {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleEnvelope {
    pub article: Article,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingEnvelope {
    #[serde(default)]
    pub trending: Vec<Article>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsEnvelope {
    #[serde(default)]
    pub recommendations: Vec<Article>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarksEnvelope {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Format a backend timestamp as `Mar 5, 2024`.
///
/// Accepts RFC 3339, RFC 2822 (what the backend's JSON encoder emits for
/// datetimes) and naive ISO timestamps. Unparseable input is returned as-is,
/// empty input yields an empty string.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let date = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2024-03-05T10:00:00Z"), "Mar 5, 2024");
        assert_eq!(format_date("Tue, 05 Mar 2024 10:00:00 GMT"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T10:00:00.123456"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("last week"), "last week");
    }

    #[test]
    fn test_article_deserializes_backend_document() {
        let article: Article = serde_json::from_str(
            r#"{
                "_id": "a1",
                "title": "Ownership in practice",
                "url": "https://example.com/a1",
                "source_name": "arXiv",
                "published_at": "2024-03-05T10:00:00Z",
                "type": "academic",
                "relevance_score": 0.874,
                "vector_embedding": [0.1, 0.2]
            }"#,
        )
        .unwrap();

        assert_eq!(article.id, "a1");
        assert_eq!(article.article_type, ArticleType::Academic);
        assert_eq!(article.relevance_percent(), Some(87));
        assert_eq!(article.summary(), "No description available.");
        assert_eq!(article.published_label(), "Mar 5, 2024");
    }

    #[test]
    fn test_article_type_defaults_to_news() {
        let article: Article =
            serde_json::from_str(r#"{"id": "a2", "title": "Release notes"}"#).unwrap();
        assert_eq!(article.article_type, ArticleType::News);
        assert!(article.relevance_percent().is_none());
    }

    #[test]
    fn test_bookmark_envelope() {
        let envelope: BookmarksEnvelope = serde_json::from_str(
            r#"{"bookmarks": [{
                "bookmark_id": "b1",
                "article": {"_id": "a1", "title": "Saved"},
                "created_at": "2024-03-05T10:00:00Z"
            }]}"#,
        )
        .unwrap();
        assert_eq!(envelope.bookmarks.len(), 1);
        assert_eq!(envelope.bookmarks[0].article.id, "a1");
    }
}
