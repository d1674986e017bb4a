//! Shared input validation.
//!
//! The same checks run on the client before dispatch and on the server
//! before any store write, so a create request is rejected identically on
//! both sides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use showcase_macros::Validate;

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the offending field (e.g. `imageUrl`).
    pub field: String,
    /// Human readable message, suitable for display next to the field.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Types whose fields can be checked before they reach the store.
pub trait Validate {
    /// Returns the first failing field, in declaration order.
    fn validate(&self) -> Result<(), ValidationError>;
}
