//! Optimistic reconciliation against a live in-process service.

mod support;
mod scenarios;
