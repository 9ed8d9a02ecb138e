use crate::error::ClientError;
use chrono::{DateTime, Utc};
use std::fmt;
use syllabuzz_models::InteractionKind;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Identifies one relation of the current user: `(object id, kind)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionKey {
    pub object_id: String,
    pub kind: InteractionKind,
}

impl InteractionKey {
    pub fn new(kind: InteractionKind, object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            kind,
        }
    }

    pub fn bookmark(article_id: impl Into<String>) -> Self {
        Self::new(InteractionKind::Bookmark, article_id)
    }

    pub fn star(module_id: impl Into<String>) -> Self {
        Self::new(InteractionKind::Star, module_id)
    }

    pub fn like(article_id: impl Into<String>) -> Self {
        Self::new(InteractionKind::Like, article_id)
    }
}

impl fmt::Display for InteractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.object_id)
    }
}

/// A toggle in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToggle {
    /// Value shown while the call is outstanding.
    pub optimistic: bool,
    /// Value restored if the call fails.
    pub previous: bool,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPhase {
    #[default]
    Unknown,
    Known {
        active: bool,
    },
    Pending(PendingToggle),
}

impl InteractionPhase {
    /// The value a view should render. Unknown renders as inactive.
    pub fn displayed(&self) -> bool {
        match self {
            InteractionPhase::Unknown => false,
            InteractionPhase::Known { active } => *active,
            InteractionPhase::Pending(pending) => pending.optimistic,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, InteractionPhase::Pending(_))
    }
}

/// Broadcast to subscribers whenever a pair changes phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionUpdate {
    pub key: InteractionKey,
    pub phase: InteractionPhase,
}

/// Result of asking the resolver to flip a relation.
#[derive(Debug)]
pub enum ToggleOutcome {
    /// No identity. Nothing changed and no call was made.
    AuthRequired,
    /// A toggle for the same pair is still in flight.
    Ignored { displayed: bool },
    /// The optimistic value is showing and the call is running.
    Started(ToggleHandle),
}

impl ToggleOutcome {
    /// Value to render right after the toggle request.
    pub fn displayed(&self) -> bool {
        match self {
            ToggleOutcome::AuthRequired => false,
            ToggleOutcome::Ignored { displayed } => *displayed,
            ToggleOutcome::Started(handle) => handle.optimistic(),
        }
    }

    /// Wait for the toggle to settle, if one was started.
    pub async fn settled(self) -> Option<ToggleResult> {
        match self {
            ToggleOutcome::Started(handle) => Some(handle.settled().await),
            _ => None,
        }
    }
}

/// Handle to an in-flight toggle.
///
/// Dropping the handle does not cancel the toggle; it still settles.
#[derive(Debug)]
pub struct ToggleHandle {
    pub(crate) key: InteractionKey,
    pub(crate) pending: PendingToggle,
    pub(crate) task: JoinHandle<ToggleResult>,
}

impl ToggleHandle {
    pub fn key(&self) -> &InteractionKey {
        &self.key
    }

    pub fn optimistic(&self) -> bool {
        self.pending.optimistic
    }

    pub async fn settled(self) -> ToggleResult {
        match self.task.await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "Toggle task failed");
                ToggleResult {
                    key: self.key,
                    active: self.pending.previous,
                    confirmed: false,
                    error: Some(ClientError::transient()),
                }
            }
        }
    }
}

/// How a toggle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResult {
    pub key: InteractionKey,
    /// Value after settling: the optimistic one if confirmed, else the previous one.
    pub active: bool,
    pub confirmed: bool,
    pub error: Option<ClientError>,
}

/// Lifetime of a view that reads interaction state.
///
/// Queries issued under a scope are discarded once it is closed.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn closed(&self) {
        self.token.cancelled().await
    }
}
