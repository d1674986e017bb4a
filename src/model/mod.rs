//! Models - Storage-backed records behind a pluggable store.
//!
//! Models provide a small CRUD abstraction for typed records. The entity
//! store is written against [`ModelStore`] so the in-memory backend can be
//! swapped for a database adapter without touching callers.
//!
//! ## Example
//!
//! ```ignore
//! use showcase::{InMemoryModelStore, Model, ModelsExt};
//!
//! #[derive(Clone, Serialize, Deserialize, Model)]
//! #[model(collection = "setups")]
//! struct Setup {
//!     pub id: String,
//!     pub likes: u32,
//! }
//!
//! let store = InMemoryModelStore::new();
//! store.models::<Setup>().insert(&setup)?;
//! let loaded = store.models::<Setup>().get("1")?;
//! ```

mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this model type (e.g., "setups").
    /// Maps to a table in SQL, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around model data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// A record with this id already exists.
    #[error("model already exists: {collection}:{id}")]
    AlreadyExists { collection: String, id: String },
    /// Serialization/deserialization error.
    #[error("model serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("model storage error: {0}")]
    Storage(String),
    /// Model not found.
    #[error("model not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
}

pub use showcase_macros::Model;

pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
