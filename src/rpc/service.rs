//! Service: procedure registry and dispatch.
//!
//! `Service<R>` holds a repository and a set of named procedures.
//! Each procedure has an optional guard and a handler; both receive a
//! `Context<R>`. The guard runs first, so authorization and input-shape
//! checks reject a call before the handler can touch the repository.
//!
//! ## Example
//!
//! ```ignore
//! use showcase::rpc::{ProcedureKind, Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(store)
//!     .query("setup.count", |ctx| Ok(json!(ctx.repo().len()?)));
//!
//! let result = service.dispatch("setup.count", json!(null), Session::new());
//! ```

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;
use super::wire::{CommandRequest, CommandResponse, ErrorEnvelope, ProcedureKind};

type Guard<R> = Box<dyn Fn(&Context<R>) -> Result<(), HandlerError> + Send + Sync>;
type Handler<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered procedure with optional guard.
struct Procedure<R> {
    kind: ProcedureKind,
    guard: Option<Guard<R>>,
    handle: Handler<R>,
}

/// Routes named procedure calls to handler functions.
///
/// Generic over `R`, the repository type. Handlers receive a `Context<R>`
/// and reach the repository via `ctx.repo()`.
pub struct Service<R> {
    repo: R,
    procedures: HashMap<String, Procedure<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            procedures: HashMap::new(),
        }
    }

    /// Register a read-only procedure without a guard.
    pub fn query<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, ProcedureKind::Query, None, Box::new(handler))
    }

    /// Register a mutating procedure without a guard.
    pub fn mutation<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, ProcedureKind::Mutation, None, Box::new(handler))
    }

    /// Register a procedure with a guard.
    ///
    /// The guard is called before the handler; its error is returned as-is
    /// and the handler does not run.
    pub fn procedure<G, F>(self, name: &str, kind: ProcedureKind, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> Result<(), HandlerError> + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, kind, Some(Box::new(guard)), Box::new(handler))
    }

    fn register(
        mut self,
        name: &str,
        kind: ProcedureKind,
        guard: Option<Guard<R>>,
        handle: Handler<R>,
    ) -> Self {
        self.procedures
            .insert(name.to_string(), Procedure { kind, guard, handle });
        self
    }

    /// Dispatch a call by procedure name.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let Some(procedure) = self.procedures.get(command) else {
            warn!(procedure = command, "unknown procedure");
            return Err(HandlerError::UnknownCommand(command.to_string()));
        };

        let authenticated = session.is_authenticated();
        let ctx = Context::new(command, input, session, &self.repo);

        let result = procedure
            .guard
            .as_ref()
            .map_or(Ok(()), |guard| guard(&ctx))
            .and_then(|()| (procedure.handle)(&ctx));

        match (&result, procedure.kind) {
            (Ok(_), ProcedureKind::Mutation) => {
                info!(procedure = command, authenticated, "mutation applied")
            }
            (Ok(_), ProcedureKind::Query) => debug!(procedure = command, "query served"),
            (Err(HandlerError::Store(err)), _) => {
                warn!(procedure = command, error = %err, "store failure")
            }
            (Err(err), _) => debug!(procedure = command, error = %err, "procedure rejected"),
        }

        result
    }

    /// Dispatch a `CommandRequest`, returning a `CommandResponse`.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(value) => CommandResponse {
                status: 200,
                body: value,
            },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: json!(ErrorEnvelope { error: e.to_body() }),
            },
        }
    }

    /// Registered procedure names with their kinds, sorted by name.
    pub fn procedures(&self) -> Vec<(&str, ProcedureKind)> {
        let mut list: Vec<_> = self
            .procedures
            .iter()
            .map(|(name, p)| (name.as_str(), p.kind))
            .collect();
        list.sort_by_key(|(name, _)| *name);
        list
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}
