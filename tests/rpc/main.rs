//! Procedure layer integration tests.

mod convention;
mod mutations;
