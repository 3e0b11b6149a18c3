//! Facade crate for the gazetteer database bootstrap tooling.
//!
//! This crate re-exports the core domain types and the provisioning pipeline
//! so that callers embedding the bootstrap only need a single dependency.

#![forbid(unsafe_code)]

pub use gazetteer_core::{
    ConnectionTarget, Connector, DbSession, HostMemory, ImportOptions, ProcessError,
    ProcessRequest, ProcessRunner, ProcessStatus, SessionError, Subsystem, VersionError,
    VersionTuple, estimate_cache_mb, require_at_least,
};
pub use gazetteer_setup::{
    SetupError, create_database, import_osm_data, install_module, load_base_data,
    setup_extensions, verify_loadable,
};
