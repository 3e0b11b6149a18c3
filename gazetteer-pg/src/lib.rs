//! Real-environment adapters for the bootstrap pipeline.
//!
//! Implements the capability traits from `gazetteer-core` against a live
//! PostgreSQL server and the local process table. Everything here is a thin
//! mapping; behaviour and failure classification live in `gazetteer-setup`.

#![forbid(unsafe_code)]

mod runner;
mod session;

pub use runner::SystemProcessRunner;
pub use session::{PgConnector, PgSession};
