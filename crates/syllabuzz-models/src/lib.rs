//! Syllabuzz Models - shared wire and domain types.
//!
//! The backend speaks JSON with a mix of naming conventions (`_id` for
//! content documents, `isBookmarked` for legacy status checks). These types
//! absorb those differences so the rest of the workspace deals with a single
//! shape.

pub mod auth;
pub mod content;
pub mod interaction;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest,
    SignupRequest, SignupResponse, User, UserEnvelope,
};
pub use content::{
    Article, ArticleEnvelope, ArticleType, ArticlesEnvelope, Bookmark, BookmarksEnvelope, Module,
    ModuleEnvelope, ModulesEnvelope, RecommendationsEnvelope, TrendingEnvelope, format_date,
};
pub use interaction::{
    ActivityType, BookmarkRequest, InteractionKind, InteractionRecord, LikeRequest,
    RecordInteractionRequest, StarRequest, StatusResponse, SuccessResponse, ToggleResponse,
};
