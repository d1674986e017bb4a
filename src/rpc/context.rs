//! Context passed to procedure handlers.
//!
//! Carries the parsed input, session variables, and a reference to the
//! repository. Handlers access everything they need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

/// The context passed to every guard and handler.
///
/// Generic over `R` (the repository type) so handlers can be written
/// against whichever store backend the service is configured with.
pub struct Context<'a, R> {
    procedure: &'a str,
    input: Value,
    session: Session,
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(procedure: &'a str, input: Value, session: Session, repo: &'a R) -> Self {
        Self {
            procedure,
            input,
            session,
            repo,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        T::deserialize(&self.input).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn procedure(&self) -> &str {
        self.procedure
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The caller's user id, or `Unauthorized` for anonymous sessions.
    pub fn user_id(&self) -> Result<&str, HandlerError> {
        self.session
            .user_id()
            .ok_or_else(|| HandlerError::Unauthorized("missing user id in session".into()))
    }

    pub fn repo(&self) -> &R {
        self.repo
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    /// Fail with `DecodeFailed` naming the first absent field.
    pub fn require_fields(&self, fields: &[&str]) -> Result<(), HandlerError> {
        match fields.iter().find(|f| !self.has_field(f)) {
            Some(missing) => Err(HandlerError::DecodeFailed(format!(
                "missing field `{}`",
                missing
            ))),
            None => Ok(()),
        }
    }
}
