//! Procedure: setup.all

use serde_json::Value;

use crate::model::ModelStore;
use crate::rpc::{Context, HandlerError, ProcedureKind};
use crate::setup::SetupStore;

pub const COMMAND: &str = "setup.all";
pub const KIND: ProcedureKind = ProcedureKind::Query;

pub fn guard<R>(_ctx: &Context<R>) -> Result<(), HandlerError> {
    Ok(())
}

pub fn handle<S: ModelStore>(ctx: &Context<SetupStore<S>>) -> Result<Value, HandlerError> {
    let setups = ctx.repo().list_all()?;
    Ok(serde_json::to_value(setups)?)
}
