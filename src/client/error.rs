//! Client-side failure taxonomy.

use std::time::Duration;

use thiserror::Error;

use crate::rpc::{CommandResponse, ErrorCode, ErrorEnvelope};
use crate::validate::ValidationError;

/// Why a call did not produce a result.
///
/// Callers match on the variant; there is no string-code inspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Input was rejected. Never retried; shown next to the field.
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },
    /// The caller has no session. Not retried automatically.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// The target entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The round-trip failed or the server could not answer.
    #[error("transport error: {0}")]
    Transport(String),
    /// No answer within the client's timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// Decode a non-success response into the matching variant.
    pub fn from_response(response: CommandResponse) -> Self {
        let status = response.status;
        let Ok(envelope) = serde_json::from_value::<ErrorEnvelope>(response.body) else {
            return ClientError::Transport(format!("unexpected response with status {status}"));
        };

        let body = envelope.error;
        match body.code {
            ErrorCode::BadRequest => ClientError::Validation {
                field: body.field,
                message: body.message,
            },
            ErrorCode::Unauthorized => ClientError::Unauthorized(body.message),
            ErrorCode::NotFound => ClientError::NotFound(body.message),
            ErrorCode::MethodNotFound | ErrorCode::InternalServerError => {
                ClientError::Transport(body.message)
            }
        }
    }

    /// Transport-class failures may be retried by the user.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Timeout(_) => true,
            ClientError::Validation { .. }
            | ClientError::Unauthorized(_)
            | ClientError::NotFound(_) => false,
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation {
            field: Some(err.field),
            message: err.message,
        }
    }
}
