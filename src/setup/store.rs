//! SetupStore - canonical entity state over a pluggable [`ModelStore`].

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::{NewSetup, Setup};
use crate::model::{ModelError, ModelStore, ModelsExt};
use crate::validate::{Validate, ValidationError};

/// Maximum number of setups returned by [`SetupStore::list_all`].
pub const PAGE_SIZE: usize = 5;

/// Errors raised by entity store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("setup not found: {0}")]
    NotFound(String),
    #[error("setup {0} cannot take more likes")]
    LikesExhausted(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Owner of canonical setup state.
///
/// Cheap to share: the backing store is expected to be clone-friendly
/// (e.g. [`InMemoryModelStore`](crate::InMemoryModelStore)).
#[derive(Clone, Default)]
pub struct SetupStore<S> {
    store: S,
}

impl<S: ModelStore> SetupStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Insert pre-built setups with their ids preserved.
    pub fn seed<I>(&self, setups: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = Setup>,
    {
        let mut inserted = 0;
        for setup in setups {
            self.store.models::<Setup>().insert(&setup)?;
            inserted += 1;
        }
        info!(count = inserted, "seeded setups");
        Ok(inserted)
    }

    /// The first [`PAGE_SIZE`] setups in insertion order.
    pub fn list_all(&self) -> Result<Vec<Setup>, StoreError> {
        Ok(self
            .store
            .models::<Setup>()
            .all()?
            .into_iter()
            .take(PAGE_SIZE)
            .map(|v| v.data)
            .collect())
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<Setup>, StoreError> {
        Ok(self.store.models::<Setup>().get(id)?.map(|v| v.data))
    }

    /// Validate and store a new setup under a fresh id.
    pub fn insert(&self, input: NewSetup) -> Result<Setup, StoreError> {
        input.validate()?;

        let setup = input.into_setup(Uuid::new_v4().to_string());
        self.store.models::<Setup>().insert(&setup)?;
        info!(id = %setup.id, title = %setup.title, "setup created");
        Ok(setup)
    }

    /// Remove a setup, returning what was removed.
    pub fn remove(&self, id: &str) -> Result<Setup, StoreError> {
        let repo = self.store.models::<Setup>();
        let existing = repo
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // A concurrent remove may win between the read and the delete.
        if !repo.delete(id)? {
            return Err(StoreError::NotFound(id.to_string()));
        }

        info!(id, "setup removed");
        Ok(existing.data)
    }

    /// Add exactly one like. Retries on version conflicts so concurrent
    /// increments on the same id are never lost; refuses at `u32::MAX`.
    pub fn increment_likes(&self, id: &str) -> Result<Setup, StoreError> {
        let repo = self.store.models::<Setup>();
        loop {
            let current = repo
                .get(id)?
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            let mut next = current.data;
            next.likes = next
                .likes
                .checked_add(1)
                .ok_or_else(|| StoreError::LikesExhausted(id.to_string()))?;

            match repo.update(&next, current.version) {
                Ok(saved) => {
                    debug!(id, likes = saved.data.likes, "setup liked");
                    return Ok(saved.data);
                }
                Err(ModelError::ConcurrencyConflict { actual, .. }) => {
                    debug!(id, actual, "like lost a version race, retrying");
                }
                Err(ModelError::NotFound { .. }) => {
                    return Err(StoreError::NotFound(id.to_string()));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Number of stored setups, unbounded by [`PAGE_SIZE`].
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.store.models::<Setup>().count()?)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// The backing model store.
    pub fn backend(&self) -> &S {
        &self.store
    }
}
