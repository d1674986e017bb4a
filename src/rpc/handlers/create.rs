//! Procedure: setup.create

use serde_json::Value;

use crate::model::ModelStore;
use crate::rpc::{Context, HandlerError, ProcedureKind};
use crate::setup::{NewSetup, SetupStore};
use crate::validate::Validate;

pub const COMMAND: &str = "setup.create";
pub const KIND: ProcedureKind = ProcedureKind::Mutation;

/// Rejects malformed or incomplete input before the store is reached.
pub fn guard<R>(ctx: &Context<R>) -> Result<(), HandlerError> {
    ctx.input::<NewSetup>()?.validate()?;
    Ok(())
}

pub fn handle<S: ModelStore>(ctx: &Context<SetupStore<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input::<NewSetup>()?;
    let setup = ctx.repo().insert(input)?;
    Ok(serde_json::to_value(setup)?)
}
