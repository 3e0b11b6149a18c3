//! Domain types and capability seams for the gazetteer database bootstrap.
//!
//! Responsibilities:
//! - Define the version tuples and the gate that rejects outdated servers.
//! - Describe the narrow database and process capabilities the pipeline
//!   consumes, so real adapters and test stubs are interchangeable.
//! - Hold the pure resource-sizing logic for the bulk importer's cache.
//!
//! Boundaries:
//! - No I/O in this crate; adapters live in `gazetteer-pg`, orchestration in
//!   `gazetteer-setup`.

#![forbid(unsafe_code)]

mod memory;
mod options;
mod process;
mod session;
mod target;
mod version;

pub use memory::{HostMemory, estimate_cache_mb};
pub use options::ImportOptions;
pub use process::{ProcessError, ProcessRequest, ProcessRunner, ProcessStatus};
pub use session::{Connector, DbSession, SessionError};
pub use target::ConnectionTarget;
pub use version::{
    POSTGIS_REQUIRED_VERSION, POSTGRES_REQUIRED_VERSION, Subsystem, VersionError, VersionTuple,
    require_at_least,
};
