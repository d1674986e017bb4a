//! InMemoryModelStore - HashMap-backed model store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Model, ModelError, ModelStore, Versioned};

/// Internal stored representation of a model.
struct StoredModel {
    bytes: Vec<u8>,
    version: u64,
    /// Insertion sequence, used to keep listing order stable.
    seq: u64,
}

#[derive(Default)]
struct Storage {
    records: HashMap<String, StoredModel>,
    next_seq: u64,
}

/// In-memory model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc; clones share
/// the same records.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, ModelError> {
        self.storage
            .read()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, ModelError> {
        self.storage
            .write()
            .map_err(|_| ModelError::Storage("lock poisoned".into()))
    }
}

fn encode<M: Model>(model: &M) -> Result<Vec<u8>, ModelError> {
    serde_json::to_vec(model).map_err(|e| ModelError::Serde(e.to_string()))
}

fn decode<M: Model>(bytes: &[u8]) -> Result<M, ModelError> {
    serde_json::from_slice(bytes).map_err(|e| ModelError::Serde(e.to_string()))
}

impl ModelStore for InMemoryModelStore {
    fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.records.get(&key) {
            Some(stored) => Ok(Some(Versioned {
                data: decode(&stored.bytes)?,
                version: stored.version,
            })),
            None => Ok(None),
        }
    }

    fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = encode(model)?;

        let mut storage = self.write()?;
        if storage.records.contains_key(&key) {
            return Err(ModelError::AlreadyExists {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            });
        }

        let seq = storage.next_seq;
        storage.next_seq += 1;
        storage.records.insert(
            key,
            StoredModel {
                bytes,
                version: 1,
                seq,
            },
        );

        Ok(Versioned {
            data: model.clone(),
            version: 1,
        })
    }

    fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError> {
        let key = Self::make_key(M::COLLECTION, model.id());
        let bytes = encode(model)?;

        let mut storage = self.write()?;
        let stored = storage
            .records
            .get_mut(&key)
            .ok_or_else(|| ModelError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            })?;

        if stored.version != expected_version {
            return Err(ModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
                expected: expected_version,
                actual: stored.version,
            });
        }

        stored.bytes = bytes;
        stored.version += 1;

        Ok(Versioned {
            data: model.clone(),
            version: stored.version,
        })
    }

    fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        let key = Self::make_key(M::COLLECTION, id);
        let mut storage = self.write()?;

        Ok(storage.records.remove(&key).is_some())
    }

    fn find_models<M: Model>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ModelError> {
        let storage = self.read()?;

        let prefix = format!("{}:", M::COLLECTION);
        let mut matched = Vec::new();

        for (key, stored) in storage.records.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let data: M = decode(&stored.bytes)?;
            if predicate(&data) {
                matched.push((
                    stored.seq,
                    Versioned {
                        data,
                        version: stored.version,
                    },
                ));
            }
        }

        matched.sort_by_key(|(seq, _)| *seq);
        Ok(matched.into_iter().map(|(_, v)| v).collect())
    }

    fn count_models<M: Model>(&self) -> Result<usize, ModelError> {
        let storage = self.read()?;
        let prefix = format!("{}:", M::COLLECTION);
        Ok(storage
            .records
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .count())
    }
}
