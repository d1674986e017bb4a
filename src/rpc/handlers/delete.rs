//! Procedure: setup.delete

use serde_json::Value;

use super::IdInput;
use crate::model::ModelStore;
use crate::rpc::{Context, HandlerError, ProcedureKind};
use crate::setup::SetupStore;

pub const COMMAND: &str = "setup.delete";
pub const KIND: ProcedureKind = ProcedureKind::Mutation;

pub fn guard<R>(ctx: &Context<R>) -> Result<(), HandlerError> {
    ctx.user_id()?;
    ctx.require_fields(&["id"])
}

/// Returns the removed setup. Deleting an id twice fails the second time
/// with `NotFound`, leaving the store as the first call left it.
pub fn handle<S: ModelStore>(ctx: &Context<SetupStore<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let removed = ctx.repo().remove(&input.id)?;
    Ok(serde_json::to_value(removed)?)
}
