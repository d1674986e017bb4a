//! Request / response shapes shared by the server and every transport.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound procedure call.
///
/// ```json
/// {
///   "command": "setup.like",
///   "input": { "id": "1" },
///   "session_variables": { "x-user-id": "user-42" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Procedure name, e.g. `setup.all`.
    pub command: String,
    /// JSON input payload.
    #[serde(default)]
    pub input: Value,
    /// Session variables, such as the caller's user id.
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// Response from dispatching a call.
///
/// On success `body` is the procedure output; otherwise it is an
/// [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    pub body: Value,
}

impl CommandResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Machine readable failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    NotFound,
    MethodNotFound,
    InternalServerError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    /// Offending input field, for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// `{ "error": { ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Whether a procedure reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Query,
    Mutation,
}
