//! Error types for procedure handlers.

use thiserror::Error;

use super::wire::{ErrorBody, ErrorCode};
use crate::model::ModelError;
use crate::setup::StoreError;
use crate::validate::ValidationError;

/// Error type for procedure dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// No procedure registered under this name.
    #[error("unknown procedure: {0}")]
    UnknownCommand(String),
    /// Input did not match the procedure's schema.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Input decoded but a field was rejected.
    #[error(transparent)]
    Validation(ValidationError),
    /// Target entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Missing or invalid authentication.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Backing store failure.
    #[error("store error: {0}")]
    Store(ModelError),
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => HandlerError::Validation(e),
            StoreError::NotFound(id) => HandlerError::NotFound(id),
            StoreError::LikesExhausted(_) => HandlerError::Validation(ValidationError::new(
                "likes",
                "Setup cannot receive more likes",
            )),
            StoreError::Model(e) => HandlerError::Store(e),
        }
    }
}

impl From<ValidationError> for HandlerError {
    fn from(err: ValidationError) -> Self {
        HandlerError::Validation(err)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::Validation(_) => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Store(_) => 500,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            HandlerError::UnknownCommand(_) => ErrorCode::MethodNotFound,
            HandlerError::DecodeFailed(_) | HandlerError::Validation(_) => ErrorCode::BadRequest,
            HandlerError::NotFound(_) => ErrorCode::NotFound,
            HandlerError::Unauthorized(_) => ErrorCode::Unauthorized,
            HandlerError::Store(_) => ErrorCode::InternalServerError,
        }
    }

    /// The error as it travels on the wire.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            HandlerError::Validation(e) => ErrorBody {
                code: self.code(),
                message: e.message.clone(),
                field: Some(e.field.clone()),
            },
            _ => ErrorBody {
                code: self.code(),
                message: self.to_string(),
                field: None,
            },
        }
    }
}
