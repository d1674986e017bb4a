//! rpc: Typed procedure layer over the entity store.
//!
//! Procedures are registered by name on a `Service`. Each one receives a
//! `Context<R>` with the input payload, session variables, and the
//! repository, and answers with JSON.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use showcase::{rpc, InMemoryModelStore, SetupStore};
//! use serde_json::json;
//!
//! let service = Arc::new(rpc::setup_service(SetupStore::new(InMemoryModelStore::new())));
//!
//! // Direct dispatch
//! let result = service.dispatch("setup.all", json!(null), rpc::Session::new());
//!
//! // HTTP transport (requires "http" feature)
//! // rpc::serve(service, "0.0.0.0:3000", shutdown).await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each procedure file follows this convention:
//!
//! ```ignore
//! pub const COMMAND: &str = "setup.like";
//! pub const KIND: ProcedureKind = ProcedureKind::Mutation;
//!
//! pub fn guard<R>(ctx: &rpc::Context<R>) -> Result<(), rpc::HandlerError> {
//!     ctx.user_id()?;
//!     ctx.require_fields(&["id"])
//! }
//!
//! pub fn handle<S: ModelStore>(
//!     ctx: &rpc::Context<SetupStore<S>>,
//! ) -> Result<Value, rpc::HandlerError> {
//!     let input = ctx.input::<IdInput>()?;
//!     Ok(serde_json::to_value(ctx.repo().increment_likes(&input.id)?)?)
//! }
//! ```

mod context;
mod error;
pub mod handlers;
mod service;
mod session;
mod wire;

pub use context::Context;
pub use error::HandlerError;
pub use handlers::setup_service;
pub use service::Service;
pub use session::{Session, USER_ID};
pub use wire::{
    CommandRequest, CommandResponse, ErrorBody, ErrorCode, ErrorEnvelope, ProcedureKind,
};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register procedure modules with a service using the convention pattern.
///
/// Each module must export:
/// - `COMMAND: &str`: the procedure name
/// - `KIND: ProcedureKind`: query or mutation
/// - `guard(ctx) -> Result<(), HandlerError>`: checks run before the handler
/// - `handle(ctx) -> Result<Value, HandlerError>`: the handler
///
/// # Example
/// ```ignore
/// let service = showcase::register_handlers!(
///     rpc::Service::new(store),
///     handlers::all,
///     handlers::like,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .procedure(
                $($seg)::+::COMMAND,
                $($seg)::+::KIND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
