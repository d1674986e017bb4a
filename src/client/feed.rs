//! SetupFeed - the state behind the setup list screen.
//!
//! Owns the query cache, the typed client and the pending toasts. The UI
//! reads [`SetupFeed::setups`] to render and calls the action methods on
//! user input; every mutation goes through [`reconcile`].

use std::cell::RefCell;
use std::rc::Rc;

use super::api::SetupClient;
use super::cache::{QueryCache, QueryKey, Snapshot};
use super::error::ClientError;
use super::notice::Notice;
use super::optimistic::{reconcile, MutationIntent, MutationKind, Settlement};
use super::transport::Transport;
use crate::setup::{NewSetup, Setup};

pub struct SetupFeed<T> {
    client: SetupClient<T>,
    cache: QueryCache,
    notices: RefCell<Vec<Notice>>,
}

impl<T: Transport> SetupFeed<T> {
    pub fn new(client: SetupClient<T>) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
            notices: RefCell::new(Vec::new()),
        }
    }

    pub fn client(&self) -> &SetupClient<T> {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        self.client.sign_in(user_id);
    }

    pub fn sign_out(&self) {
        self.client.sign_out();
    }

    /// The list as currently rendered; empty before the first load.
    pub fn setups(&self) -> Snapshot {
        self.cache
            .read(&QueryKey::all())
            .unwrap_or_else(|| Rc::from(Vec::new()))
    }

    /// Cached list, refetched when missing or invalidated.
    pub async fn load(&self) -> Result<Snapshot, ClientError> {
        self.cache
            .query(&QueryKey::all(), move || self.client.all())
            .await
    }

    /// Refetch the list regardless of staleness.
    pub async fn refresh(&self) -> Result<Snapshot, ClientError> {
        let key = QueryKey::all();
        match self.cache.fetch(&key, move || self.client.all()).await? {
            Some(snapshot) => Ok(snapshot),
            None => Ok(self.setups()),
        }
    }

    pub async fn find(&self, id: &str) -> Result<Option<Setup>, ClientError> {
        let snapshot = self
            .cache
            .query(&QueryKey::by_id(id), move || async move {
                self.client
                    .by_id(id)
                    .await
                    .map(|found| found.into_iter().collect::<Vec<_>>())
            })
            .await?;
        Ok(snapshot.first().cloned())
    }

    pub async fn like(&self, id: &str) -> Settlement {
        self.settle(MutationIntent::like(id)).await
    }

    pub async fn delete(&self, id: &str) -> Settlement {
        self.settle(MutationIntent::delete(id)).await
    }

    /// Create a setup. Validation failures are returned for inline display
    /// and raise no toast.
    pub async fn create(&self, input: NewSetup) -> Result<Setup, ClientError> {
        match self.client.create(&input).await {
            Ok(setup) => {
                self.cache.invalidate(&QueryKey::all());
                self.push_notice(Notice::info("Setup created"));
                Ok(setup)
            }
            Err(err) => {
                if !matches!(err, ClientError::Validation { .. }) {
                    self.push_notice(Notice::for_failure("create", &err));
                }
                Err(err)
            }
        }
    }

    /// Take every notice raised since the last call.
    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    async fn settle(&self, intent: MutationIntent) -> Settlement {
        let detail_key = QueryKey::by_id(&intent.id);
        let settlement = reconcile(&self.cache, &QueryKey::all(), intent, move |intent| async move {
            match intent.kind {
                MutationKind::Like => self.client.like(&intent.id).await,
                MutationKind::Delete => self.client.delete(&intent.id).await,
            }
        })
        .await;

        match &settlement {
            Settlement::Committed { intent, .. } => match intent.kind {
                MutationKind::Like => self.cache.invalidate(&detail_key),
                MutationKind::Delete => {
                    self.cache.remove(&detail_key);
                }
            },
            Settlement::RolledBack { notice, .. } => self.push_notice(notice.clone()),
        }

        settlement
    }

    fn push_notice(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
