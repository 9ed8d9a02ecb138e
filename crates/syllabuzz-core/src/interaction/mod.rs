//! Interaction state: bookmarks, stars and likes of the current user.

mod backend;
mod resolver;
mod types;

pub use backend::{HttpInteractionBackend, InteractionBackend};
pub use resolver::InteractionResolver;
pub use types::{
    InteractionKey, InteractionPhase, InteractionUpdate, PendingToggle, ToggleHandle,
    ToggleOutcome, ToggleResult, ViewScope,
};
