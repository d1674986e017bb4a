//! Procedure: setup.like

use serde_json::Value;

use super::IdInput;
use crate::model::ModelStore;
use crate::rpc::{Context, HandlerError, ProcedureKind};
use crate::setup::SetupStore;

pub const COMMAND: &str = "setup.like";
pub const KIND: ProcedureKind = ProcedureKind::Mutation;

pub fn guard<R>(ctx: &Context<R>) -> Result<(), HandlerError> {
    ctx.user_id()?;
    ctx.require_fields(&["id"])
}

/// Not idempotent: every accepted call adds one like.
pub fn handle<S: ModelStore>(ctx: &Context<SetupStore<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let liked = ctx.repo().increment_likes(&input.id)?;
    Ok(serde_json::to_value(liked)?)
}
