//! Optimistic reconciliation.
//!
//! A mutation intent is shown to the user before the server confirms it:
//!
//! 1. cancel any in-flight refetch of the affected query,
//! 2. keep the current snapshot as the rollback point,
//! 3. write the speculative snapshot,
//! 4. call the server,
//! 5. on success drop the rollback point and invalidate the query; on
//!    failure write the rollback point back and raise a notice.
//!
//! Steps 1 to 3 and 5 run without yielding; only step 4 suspends. Intents
//! settle in completion order.
//!
//! Intents snapshot independently. Rolling one back can undo another
//! intent's patch on the same query. A rollback restores data but never
//! freshness, so the invalidation that follows every successful settlement
//! still forces the next query to refetch.

use std::future::Future;

use tracing::{debug, info, warn};

use super::cache::{QueryCache, QueryKey, Snapshot};
use super::error::ClientError;
use super::notice::Notice;
use crate::setup::Setup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Like,
}

impl MutationKind {
    pub fn verb(self) -> &'static str {
        match self {
            MutationKind::Delete => "delete",
            MutationKind::Like => "like",
        }
    }
}

/// A requested change awaiting server confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationIntent {
    pub id: String,
    pub kind: MutationKind,
}

impl MutationIntent {
    pub fn delete(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MutationKind::Delete,
        }
    }

    pub fn like(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MutationKind::Like,
        }
    }

    /// The snapshot as it would look once this intent is confirmed.
    pub fn speculate(&self, current: &[Setup]) -> Vec<Setup> {
        match self.kind {
            MutationKind::Delete => current
                .iter()
                .filter(|setup| setup.id != self.id)
                .cloned()
                .collect(),
            MutationKind::Like => current
                .iter()
                .map(|setup| {
                    let mut setup = setup.clone();
                    if setup.id == self.id {
                        // At the ceiling the server refuses; show no change.
                        if let Some(likes) = setup.likes.checked_add(1) {
                            setup.likes = likes;
                        }
                    }
                    setup
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentState {
    Pending,
    SettledSuccess,
    SettledRollback,
}

/// How an intent ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The server accepted the change. `confirmed` is the server's copy of
    /// the entity, or `None` when a delete found it already gone.
    Committed {
        intent: MutationIntent,
        confirmed: Option<Setup>,
    },
    /// The speculative patch was undone.
    RolledBack {
        intent: MutationIntent,
        error: ClientError,
        notice: Notice,
    },
}

impl Settlement {
    pub fn state(&self) -> IntentState {
        match self {
            Settlement::Committed { .. } => IntentState::SettledSuccess,
            Settlement::RolledBack { .. } => IntentState::SettledRollback,
        }
    }

    pub fn intent(&self) -> &MutationIntent {
        match self {
            Settlement::Committed { intent, .. } | Settlement::RolledBack { intent, .. } => intent,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Settlement::Committed { .. })
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Settlement::Committed { .. } => None,
            Settlement::RolledBack { notice, .. } => Some(notice),
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Settlement::Committed { .. } => None,
            Settlement::RolledBack { error, .. } => Some(error),
        }
    }
}

/// The pre-patch snapshot owned by one pending intent.
///
/// Restores itself on drop unless released, so a settlement future that is
/// dropped mid-flight still rolls its patch back.
struct RollbackPoint<'c> {
    cache: &'c QueryCache,
    key: QueryKey,
    snapshot: Option<Snapshot>,
    armed: bool,
}

impl<'c> RollbackPoint<'c> {
    fn capture(cache: &'c QueryCache, key: &QueryKey) -> Self {
        Self {
            cache,
            key: key.clone(),
            snapshot: cache.read(key),
            armed: false,
        }
    }

    /// Apply `intent` on top of the captured snapshot. Nothing is written
    /// when the query has no data yet.
    fn speculate(&mut self, intent: &MutationIntent) {
        if let Some(current) = &self.snapshot {
            self.cache.write(&self.key, intent.speculate(current));
            self.armed = true;
        }
    }

    fn release(mut self) {
        self.armed = false;
    }

    fn restore(mut self) {
        self.rollback();
    }

    fn rollback(&mut self) {
        if !std::mem::replace(&mut self.armed, false) {
            return;
        }
        if let Some(snapshot) = &self.snapshot {
            self.cache.restore(&self.key, Snapshot::clone(snapshot));
        }
    }
}

impl Drop for RollbackPoint<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(key = %self.key, "intent dropped while pending, rolling back");
            self.rollback();
        }
    }
}

/// Drive `intent` against `key` through `remote` until it settles.
///
/// `remote` performs the server call for the intent. A delete answered with
/// `NotFound` counts as success: the entity is gone either way.
pub async fn reconcile<F, Fut>(
    cache: &QueryCache,
    key: &QueryKey,
    intent: MutationIntent,
    remote: F,
) -> Settlement
where
    F: FnOnce(MutationIntent) -> Fut,
    Fut: Future<Output = Result<Setup, ClientError>>,
{
    cache.cancel_in_flight(key);

    let mut point = RollbackPoint::capture(cache, key);
    point.speculate(&intent);
    debug!(key = %key, id = %intent.id, kind = intent.kind.verb(), "speculative patch applied");

    let outcome = remote(intent.clone()).await;

    match outcome {
        Ok(confirmed) => {
            point.release();
            cache.invalidate(key);
            info!(id = %intent.id, kind = intent.kind.verb(), "intent committed");
            Settlement::Committed {
                intent,
                confirmed: Some(confirmed),
            }
        }
        Err(ClientError::NotFound(_)) if intent.kind == MutationKind::Delete => {
            point.release();
            cache.invalidate(key);
            info!(id = %intent.id, "delete already applied");
            Settlement::Committed {
                intent,
                confirmed: None,
            }
        }
        Err(error) => {
            point.restore();
            let notice = Notice::for_failure(intent.kind.verb(), &error);
            warn!(id = %intent.id, kind = intent.kind.verb(), error = %error, "intent rolled back");
            Settlement::RolledBack {
                intent,
                error,
                notice,
            }
        }
    }
}
