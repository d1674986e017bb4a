//! Procedure: setup.byId

use serde_json::Value;

use super::IdInput;
use crate::model::ModelStore;
use crate::rpc::{Context, HandlerError, ProcedureKind};
use crate::setup::SetupStore;

pub const COMMAND: &str = "setup.byId";
pub const KIND: ProcedureKind = ProcedureKind::Query;

pub fn guard<R>(ctx: &Context<R>) -> Result<(), HandlerError> {
    ctx.require_fields(&["id"])
}

/// Absent ids answer `null`, not an error.
pub fn handle<S: ModelStore>(ctx: &Context<SetupStore<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<IdInput>()?;
    let setup = ctx.repo().find_by_id(&input.id)?;
    Ok(serde_json::to_value(setup)?)
}
