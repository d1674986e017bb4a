//! Session variables attached to an incoming call.

use std::collections::HashMap;

/// Header / variable carrying the authenticated user id.
pub const USER_ID: &str = "x-user-id";

/// Parsed session variables from the incoming request.
///
/// The authentication provider sits in front of the service and forwards
/// the caller's identity as variables (HTTP headers on the wire):
///
/// ```json
/// {
///   "x-user-id": "user-42"
/// }
/// ```
///
/// A session without `x-user-id` is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an authenticated user.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID, user_id);
        session
    }

    /// Create a session from a map of variables. Keys are lowercased.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self {
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID).filter(|id| !id.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables
            .insert(key.into().to_ascii_lowercase(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }
}
