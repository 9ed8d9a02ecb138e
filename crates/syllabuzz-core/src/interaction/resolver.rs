use super::backend::InteractionBackend;
use super::types::{
    InteractionKey, InteractionPhase, InteractionUpdate, PendingToggle, ToggleHandle,
    ToggleOutcome, ToggleResult, ViewScope,
};
use crate::error::ClientError;
use crate::notify::{Notice, Notifier};
use crate::session::SessionState;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use syllabuzz_models::InteractionKind;
use tokio::sync::broadcast;

const UPDATE_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy)]
struct Entry {
    phase: InteractionPhase,
    /// Changes on every phase transition of this entry.
    revision: u64,
    /// Session epoch the entry belongs to.
    epoch: u64,
}

#[derive(Default)]
struct Cache {
    entries: HashMap<InteractionKey, Entry>,
    next_revision: u64,
    /// Newest session epoch seen on insert.
    epoch: u64,
}

impl Cache {
    fn next_revision(&mut self) -> u64 {
        self.next_revision += 1;
        self.next_revision
    }

    /// Entry for `key`, ignoring entries left over from another session.
    fn current(&self, key: &InteractionKey, epoch: u64) -> Option<Entry> {
        self.entries
            .get(key)
            .copied()
            .filter(|entry| entry.epoch == epoch)
    }

    /// Store a new phase for `key`. Entries from older sessions are dropped
    /// the first time a newer epoch is written.
    fn insert(&mut self, key: &InteractionKey, phase: InteractionPhase, epoch: u64) -> u64 {
        if epoch > self.epoch {
            self.entries.clear();
            self.epoch = epoch;
        }
        let revision = self.next_revision();
        self.entries.insert(
            key.clone(),
            Entry {
                phase,
                revision,
                epoch,
            },
        );
        revision
    }
}

struct Inner {
    backend: Arc<dyn InteractionBackend>,
    session: Arc<SessionState>,
    notifier: Arc<dyn Notifier>,
    cache: Mutex<Cache>,
    updates: broadcast::Sender<InteractionUpdate>,
}

impl Inner {
    fn publish(&self, update: InteractionUpdate) {
        // No receivers is fine.
        let _ = self.updates.send(update);
    }
}

/// Tracks whether the current user bookmarked, starred or liked an entity.
///
/// State is kept per `(object id, kind)` in a cache shared by every view, and
/// each change is broadcast to subscribers. Toggles are optimistic: the new
/// value is visible as soon as [`InteractionResolver::toggle`] returns and is
/// rolled back if the server does not confirm it. Only one toggle per pair
/// can be in flight; further requests are ignored until it settles.
#[derive(Clone)]
pub struct InteractionResolver {
    inner: Arc<Inner>,
}

impl InteractionResolver {
    pub fn new(
        backend: Arc<dyn InteractionBackend>,
        session: Arc<SessionState>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                backend,
                session,
                notifier,
                cache: Mutex::new(Cache::default()),
                updates,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<InteractionUpdate> {
        self.inner.updates.subscribe()
    }

    /// Cached phase of a pair, without touching the network.
    pub fn phase(&self, key: &InteractionKey) -> InteractionPhase {
        let epoch = self.inner.session.epoch();
        self.inner
            .cache
            .lock()
            .current(key, epoch)
            .map(|entry| entry.phase)
            .unwrap_or_default()
    }

    pub fn displayed(&self, key: &InteractionKey) -> bool {
        self.phase(key).displayed()
    }

    /// Current value for a view, querying the server only when nothing is cached.
    ///
    /// Anonymous users read as inactive without a call. Returns `None` when
    /// the view closed before the answer arrived.
    pub async fn status(&self, key: &InteractionKey, scope: &ViewScope) -> Option<bool> {
        if scope.is_closed() {
            return None;
        }
        if !self.inner.session.is_authenticated() {
            return Some(false);
        }
        match self.phase(key) {
            InteractionPhase::Known { active } => Some(active),
            InteractionPhase::Pending(pending) => Some(pending.optimistic),
            InteractionPhase::Unknown => self.query(key, scope).await,
        }
    }

    /// Like [`InteractionResolver::status`] but always asks the server,
    /// unless a toggle is in flight.
    pub async fn refresh(&self, key: &InteractionKey, scope: &ViewScope) -> Option<bool> {
        if scope.is_closed() {
            return None;
        }
        if !self.inner.session.is_authenticated() {
            return Some(false);
        }
        if let InteractionPhase::Pending(pending) = self.phase(key) {
            return Some(pending.optimistic);
        }
        self.query(key, scope).await
    }

    async fn query(&self, key: &InteractionKey, scope: &ViewScope) -> Option<bool> {
        let epoch = self.inner.session.epoch();
        let start_revision = self
            .inner
            .cache
            .lock()
            .current(key, epoch)
            .map(|entry| entry.revision);

        let result = tokio::select! {
            _ = scope.closed() => {
                tracing::debug!(key = %key, "View closed, dropping status query");
                return None;
            }
            result = self.inner.backend.status(key) => result,
        };
        if scope.is_closed() {
            return None;
        }

        let active = match result {
            Ok(active) => active,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Status query failed, treating as inactive");
                false
            }
        };

        let mut cache = self.inner.cache.lock();
        let current_epoch = self.inner.session.epoch();
        if current_epoch != epoch {
            tracing::debug!(key = %key, "Session changed during status query, discarding result");
            let displayed = cache
                .current(key, current_epoch)
                .map(|entry| entry.phase.displayed())
                .unwrap_or(false);
            return Some(displayed);
        }

        if let Some(existing) = cache.current(key, epoch)
            && (existing.phase.is_pending() || Some(existing.revision) != start_revision)
        {
            tracing::debug!(key = %key, "Status query overtaken by a newer state, discarding result");
            return Some(existing.phase.displayed());
        }

        // Published under the lock so subscribers see phases in cache order.
        let phase = InteractionPhase::Known { active };
        cache.insert(key, phase, epoch);
        self.inner.publish(InteractionUpdate {
            key: key.clone(),
            phase,
        });
        Some(active)
    }

    /// Flip a relation for the current user.
    ///
    /// Runs synchronously up to the network call: the identity check and the
    /// optimistic update both happen before this returns. The server call runs
    /// on its own task and settles even if the returned handle is dropped.
    /// Must be called within a Tokio runtime.
    ///
    /// `context` is the module id an article was opened from.
    pub fn toggle(&self, key: &InteractionKey, context: Option<String>) -> ToggleOutcome {
        if !self.inner.session.is_authenticated() {
            tracing::debug!(key = %key, "Toggle without identity");
            self.inner
                .notifier
                .notify(Notice::auth_required(auth_prompt(key.kind)));
            return ToggleOutcome::AuthRequired;
        }

        let epoch = self.inner.session.epoch();
        let (pending, revision) = {
            let mut cache = self.inner.cache.lock();
            let current = cache
                .current(key, epoch)
                .map(|entry| entry.phase)
                .unwrap_or_default();

            if let InteractionPhase::Pending(pending) = current {
                tracing::debug!(key = %key, "Toggle already in flight, ignoring");
                return ToggleOutcome::Ignored {
                    displayed: pending.optimistic,
                };
            }

            let previous = current.displayed();
            let pending = PendingToggle {
                optimistic: !previous,
                previous,
                issued_at: Utc::now(),
            };
            let revision = cache.insert(key, InteractionPhase::Pending(pending), epoch);
            self.inner.publish(InteractionUpdate {
                key: key.clone(),
                phase: InteractionPhase::Pending(pending),
            });
            (pending, revision)
        };

        let inner = self.inner.clone();
        let task_key = key.clone();
        let task = tokio::spawn(settle(inner, task_key, pending, revision, context));

        ToggleOutcome::Started(ToggleHandle {
            key: key.clone(),
            pending,
            task,
        })
    }
}

async fn settle(
    inner: Arc<Inner>,
    key: InteractionKey,
    pending: PendingToggle,
    revision: u64,
    context: Option<String>,
) -> ToggleResult {
    let backend = inner.backend.clone();
    let call_key = key.clone();
    let call = tokio::spawn(async move {
        backend
            .set(&call_key, pending.optimistic, context.as_deref())
            .await
    });

    let outcome = match call.await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(key = %key, error = %err, "Interaction call aborted");
            Err(ClientError::transient())
        }
    };

    let (confirmed, error) = match outcome {
        Ok(success) => (success, None),
        Err(err) => (false, Some(err)),
    };
    let active = if confirmed {
        pending.optimistic
    } else {
        pending.previous
    };

    {
        let mut cache = inner.cache.lock();
        let next = cache.next_revision();
        let settled = cache
            .entries
            .get_mut(&key)
            .filter(|entry| entry.revision == revision)
            .map(|entry| {
                entry.phase = InteractionPhase::Known { active };
                entry.revision = next;
                (entry.epoch, entry.phase)
            });
        if let Some((epoch, phase)) = settled
            && epoch == inner.session.epoch()
        {
            inner.publish(InteractionUpdate {
                key: key.clone(),
                phase,
            });
        }
    }

    if confirmed {
        tracing::info!(key = %key, active, "Interaction updated");
        inner.notifier.notify(success_notice(key.kind, active));
    } else {
        tracing::warn!(key = %key, error = ?error, "Interaction change failed, rolled back");
        inner
            .notifier
            .notify(failure_notice(key.kind, error.as_ref()));
    }

    ToggleResult {
        key,
        active,
        confirmed,
        error,
    }
}

fn auth_prompt(kind: InteractionKind) -> &'static str {
    match kind {
        InteractionKind::Bookmark => "Please log in to save articles.",
        InteractionKind::Star => "Please log in to star modules.",
        InteractionKind::Like => "Please log in to like articles.",
    }
}

fn success_notice(kind: InteractionKind, active: bool) -> Notice {
    let (title, message) = match (kind, active) {
        (InteractionKind::Bookmark, true) => ("Article saved", "Article added to your bookmarks."),
        (InteractionKind::Bookmark, false) => {
            ("Article unsaved", "Article removed from your bookmarks.")
        }
        (InteractionKind::Star, true) => ("Module starred", "You are now following this module."),
        (InteractionKind::Star, false) => {
            ("Module unstarred", "You are no longer following this module.")
        }
        (InteractionKind::Like, true) => ("Article liked", "Thanks for the feedback."),
        (InteractionKind::Like, false) => ("Like removed", "Your like was removed."),
    };
    Notice::success(title, message)
}

fn failure_notice(kind: InteractionKind, error: Option<&ClientError>) -> Notice {
    let (title, action) = match kind {
        InteractionKind::Bookmark => ("Failed to save article", "Bookmark"),
        InteractionKind::Star => ("Failed to update module star", "Star"),
        InteractionKind::Like => ("Failed to like article", "Like"),
    };
    let message = match error {
        Some(err) => err.user_message(action),
        None => "The server did not accept the change. Please try again.".to_string(),
    };
    Notice::error(title, message)
}
