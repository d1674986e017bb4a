//! Typed client for the `setup` procedures.

use std::cell::RefCell;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::error::ClientError;
use super::transport::Transport;
use crate::rpc::handlers::{all, by_id, create, delete, like};
use crate::rpc::{CommandRequest, Session};
use crate::setup::{NewSetup, Setup};
use crate::validate::Validate;

/// Applied to every call unless overridden with [`SetupClient::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed calls over any [`Transport`], carrying the caller's session.
pub struct SetupClient<T> {
    transport: T,
    session: RefCell<Session>,
    timeout: Duration,
}

impl<T: Transport> SetupClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            session: RefCell::new(Session::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Attach the identity handed out by the authentication provider.
    pub fn sign_in(&self, user_id: impl Into<String>) {
        *self.session.borrow_mut() = Session::authenticated(user_id);
    }

    pub fn sign_out(&self) {
        *self.session.borrow_mut() = Session::new();
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub async fn all(&self) -> Result<Vec<Setup>, ClientError> {
        self.call(all::COMMAND, Value::Null).await
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<Setup>, ClientError> {
        self.call(by_id::COMMAND, json!({ "id": id })).await
    }

    /// Validates locally first; an invalid form never leaves the client.
    pub async fn create(&self, input: &NewSetup) -> Result<Setup, ClientError> {
        input.validate()?;
        let payload = serde_json::to_value(input)
            .map_err(|e| ClientError::Transport(format!("unencodable input: {e}")))?;
        self.call(create::COMMAND, payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<Setup, ClientError> {
        self.call(delete::COMMAND, json!({ "id": id })).await
    }

    pub async fn like(&self, id: &str) -> Result<Setup, ClientError> {
        self.call(like::COMMAND, json!({ "id": id })).await
    }

    async fn call<O: DeserializeOwned>(&self, command: &str, input: Value) -> Result<O, ClientError> {
        let request = CommandRequest {
            command: command.to_string(),
            input,
            session_variables: self.session.borrow().variables().clone(),
        };

        let response = tokio::time::timeout(self.timeout, self.transport.call(request))
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))??;

        if !response.is_success() {
            let err = ClientError::from_response(response);
            debug!(procedure = command, error = %err, "call failed");
            return Err(err);
        }

        serde_json::from_value(response.body)
            .map_err(|e| ClientError::Transport(format!("malformed response: {e}")))
    }
}
