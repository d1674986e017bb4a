//! Client query cache.
//!
//! Holds the last known-good server answer per query key. Everything here
//! runs on the client's single event loop: state lives in `RefCell`s and
//! no borrow is ever held across an `.await` or a listener call.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use tracing::debug;

use crate::rpc::handlers::{all, by_id};
use crate::setup::Setup;

/// An immutable query result. Cloning shares the allocation.
pub type Snapshot = Rc<[Setup]>;

/// Identifies a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// `setup.all`
    pub fn all() -> Self {
        QueryKey(all::COMMAND.to_string())
    }

    /// `setup.byId/<id>`
    pub fn by_id(id: &str) -> Self {
        QueryKey(format!("{}/{}", by_id::COMMAND, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Updated(QueryKey),
    Invalidated(QueryKey),
    Removed(QueryKey),
}

impl CacheEvent {
    pub fn key(&self) -> &QueryKey {
        match self {
            CacheEvent::Updated(key) | CacheEvent::Invalidated(key) | CacheEvent::Removed(key) => {
                key
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&CacheEvent)>;

#[derive(Default)]
struct Entry {
    data: Option<Snapshot>,
    stale: bool,
    /// Bumped by every fetch start and every cancel; a fetch may only
    /// write if the generation it started with is still current.
    generation: u64,
    in_flight: bool,
}

/// Query key → most recent snapshot.
#[derive(Default)]
pub struct QueryCache {
    entries: RefCell<HashMap<QueryKey, Entry>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_listener: Cell<u64>,
    pending_events: RefCell<VecDeque<CacheEvent>>,
    delivering: Cell<bool>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, key: &QueryKey) -> Option<Snapshot> {
        self.entries.borrow().get(key).and_then(|e| e.data.clone())
    }

    /// True when there is no data or the data was invalidated.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .borrow()
            .get(key)
            .map_or(true, |e| e.stale || e.data.is_none())
    }

    /// True while a fetch for `key` may still write its result.
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries.borrow().get(key).is_some_and(|e| e.in_flight)
    }

    /// Replace the snapshot for `key` and mark it fresh.
    pub fn write(&self, key: &QueryKey, snapshot: impl Into<Snapshot>) {
        {
            let mut entries = self.entries.borrow_mut();
            let entry = entries.entry(key.clone()).or_default();
            entry.data = Some(snapshot.into());
            entry.stale = false;
        }
        self.emit(CacheEvent::Updated(key.clone()));
    }

    /// Put a previously read snapshot back without touching staleness.
    ///
    /// An invalidation that happened since the snapshot was taken still
    /// forces the next [`query`](Self::query) to refetch.
    pub fn restore(&self, key: &QueryKey, snapshot: Snapshot) {
        {
            let mut entries = self.entries.borrow_mut();
            let entry = entries.entry(key.clone()).or_default();
            entry.data = Some(snapshot);
        }
        self.emit(CacheEvent::Updated(key.clone()));
    }

    /// Mark `key` stale; the next [`query`](Self::query) refetches it.
    /// Data stays readable until then.
    pub fn invalidate(&self, key: &QueryKey) {
        let marked = match self.entries.borrow_mut().get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        };
        if marked {
            self.emit(CacheEvent::Invalidated(key.clone()));
        }
    }

    /// Drop the snapshot for `key`. Any in-flight fetch is cancelled.
    pub fn remove(&self, key: &QueryKey) -> Option<Snapshot> {
        let removed = self.entries.borrow_mut().get_mut(key).map(|entry| {
            entry.generation += 1;
            entry.in_flight = false;
            entry.stale = true;
            entry.data.take()
        });
        let removed = removed.flatten();
        if removed.is_some() {
            self.emit(CacheEvent::Removed(key.clone()));
        }
        removed
    }

    /// Keep a pending fetch for `key` from writing its result.
    ///
    /// Advisory: the underlying request still runs to completion, its answer
    /// is simply discarded. Returns whether a fetch was pending.
    pub fn cancel_in_flight(&self, key: &QueryKey) -> bool {
        let mut entries = self.entries.borrow_mut();
        let Some(entry) = entries.get_mut(key) else {
            return false;
        };
        entry.generation += 1;
        let was_in_flight = std::mem::replace(&mut entry.in_flight, false);
        if was_in_flight {
            debug!(key = %key, "cancelled in-flight fetch");
        }
        was_in_flight
    }

    /// Run `fetcher` and store its result unless it was superseded.
    ///
    /// Returns `Ok(None)` when a cancel or a newer fetch took over while
    /// this one was pending; the cache is left untouched in that case.
    pub async fn fetch<F, Fut, E>(&self, key: &QueryKey, fetcher: F) -> Result<Option<Snapshot>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Setup>, E>>,
    {
        let token = {
            let mut entries = self.entries.borrow_mut();
            let entry = entries.entry(key.clone()).or_default();
            entry.generation += 1;
            entry.in_flight = true;
            entry.generation
        };
        let pending = PendingFetch {
            cache: self,
            key,
            token,
        };

        let result = fetcher().await;

        if !pending.settle() {
            debug!(key = %key, "discarded superseded fetch");
            return Ok(None);
        }

        let rows = result?;
        let snapshot: Snapshot = rows.into();
        self.write(key, Rc::clone(&snapshot));
        Ok(Some(snapshot))
    }

    /// Fresh data for `key`, refetching when missing or stale.
    ///
    /// If the refetch is superseded, whatever the cache holds afterwards is
    /// returned instead.
    pub async fn query<F, Fut, E>(&self, key: &QueryKey, fetcher: F) -> Result<Snapshot, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Setup>, E>>,
    {
        if !self.is_stale(key) {
            if let Some(snapshot) = self.read(key) {
                return Ok(snapshot);
            }
        }

        match self.fetch(key, fetcher).await? {
            Some(snapshot) => Ok(snapshot),
            None => Ok(self.read(key).unwrap_or_else(|| Rc::from(Vec::new()))),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&CacheEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Deliver `event` to every listener.
    ///
    /// Events raised by a listener (a nested write or invalidate) are queued
    /// and delivered after the current one, in order.
    fn emit(&self, event: CacheEvent) {
        self.pending_events.borrow_mut().push_back(event);
        if self.delivering.replace(true) {
            return;
        }

        loop {
            let next = self.pending_events.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            let listeners: Vec<Listener> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in listeners {
                listener(&event);
            }
        }

        self.delivering.set(false);
    }
}

/// Marks a fetch as no longer in flight, also when its future is dropped.
struct PendingFetch<'c> {
    cache: &'c QueryCache,
    key: &'c QueryKey,
    token: u64,
}

impl PendingFetch<'_> {
    /// Whether this fetch is still the current one for its key.
    fn settle(self) -> bool {
        self.clear()
    }

    fn clear(&self) -> bool {
        let mut entries = self.cache.entries.borrow_mut();
        let Some(entry) = entries.get_mut(self.key) else {
            return false;
        };
        let current = entry.generation == self.token;
        if current {
            entry.in_flight = false;
        }
        current
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        self.clear();
    }
}
