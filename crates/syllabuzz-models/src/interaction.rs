//! User-to-content relations (bookmark, star, like) and activity records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named user-to-entity relationship that can be toggled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Saved article
    Bookmark,
    /// Followed module
    Star,
    /// Liked article
    Like,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::Bookmark,
        InteractionKind::Star,
        InteractionKind::Like,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::Bookmark => "bookmark",
            InteractionKind::Star => "star",
            InteractionKind::Like => "like",
        }
    }

    /// What kind of entity the relation points at.
    pub fn object_noun(self) -> &'static str {
        match self {
            InteractionKind::Star => "module",
            InteractionKind::Bookmark | InteractionKind::Like => "article",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bookmark" | "save" => Ok(InteractionKind::Bookmark),
            "star" => Ok(InteractionKind::Star),
            "like" => Ok(InteractionKind::Like),
            other => Err(format!(
                "unknown interaction kind '{other}' (expected bookmark, star or like)"
            )),
        }
    }
}

/// One user's relationship to one entity for one relation kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionRecord {
    pub subject_id: String,
    pub object_id: String,
    pub kind: InteractionKind,
    pub active: bool,
}

/// Status query response.
///
/// Older endpoints answer with `isBookmarked` / `isStarred` / `isLiked`
/// instead of `active`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    #[serde(alias = "isBookmarked", alias = "isStarred", alias = "isLiked")]
    pub active: bool,
}

fn default_success() -> bool {
    true
}

/// Toggle-on / toggle-off response.
///
/// Endpoints that only return a message on 2xx are treated as successful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRequest {
    pub article_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub article_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarRequest {
    pub module_id: String,
}

/// Activity types fed to the recommendation engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    View,
    Like,
    Bookmark,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInteractionRequest {
    pub user_id: String,
    pub article_id: String,
    pub module_id: Option<String>,
    #[serde(rename = "type")]
    pub activity: ActivityType,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_accepts_legacy_fields() {
        let cases = [
            r#"{"active": true}"#,
            r#"{"isBookmarked": true}"#,
            r#"{"isStarred": true}"#,
            r#"{"isLiked": true}"#,
        ];
        for raw in cases {
            let status: StatusResponse = serde_json::from_str(raw).unwrap();
            assert!(status.active, "{raw}");
        }
    }

    #[test]
    fn test_toggle_response_defaults_to_success() {
        let response: ToggleResponse =
            serde_json::from_str(r#"{"message": "Article bookmarked successfully"}"#).unwrap();
        assert!(response.success);

        let response: ToggleResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Bookmark".parse::<InteractionKind>(), Ok(InteractionKind::Bookmark));
        assert_eq!("star".parse::<InteractionKind>(), Ok(InteractionKind::Star));
        assert!("follow".parse::<InteractionKind>().is_err());
        assert_eq!(InteractionKind::Star.object_noun(), "module");
    }

    #[test]
    fn test_record_interaction_wire_shape() {
        let request = RecordInteractionRequest {
            user_id: "u1".to_string(),
            article_id: "a1".to_string(),
            module_id: None,
            activity: ActivityType::View,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "view");
        assert!(value["module_id"].is_null());
    }
}
