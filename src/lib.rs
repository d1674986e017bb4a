extern crate self as showcase;

pub mod client;
pub mod config;
mod model;
pub mod rpc;
mod setup;
pub mod telemetry;
mod validate;

pub use model::{
    InMemoryModelStore, Model, ModelError, ModelRepository, ModelStore, ModelsExt, Versioned,
};
pub use setup::{mock_setups, NewSetup, Setup, SetupStore, StoreError, PAGE_SIZE};
pub use validate::{Validate, ValidationError};
