//! The `setup` procedures.
//!
//! Each procedure lives in its own file and exports `COMMAND`, `KIND`,
//! `guard` and `handle`; [`setup_service`] registers all of them.

use serde::Deserialize;

use super::Service;
use crate::model::ModelStore;
use crate::setup::SetupStore;

pub mod all;
pub mod by_id;
pub mod create;
pub mod delete;
pub mod like;

/// Input of every procedure addressing a single setup.
#[derive(Debug, Deserialize)]
pub struct IdInput {
    pub id: String,
}

/// A service exposing the full `setup` namespace over `store`.
pub fn setup_service<S>(store: SetupStore<S>) -> Service<SetupStore<S>>
where
    S: ModelStore + 'static,
{
    crate::register_handlers!(
        Service::new(store),
        all,
        by_id,
        create,
        delete,
        like,
    )
}
