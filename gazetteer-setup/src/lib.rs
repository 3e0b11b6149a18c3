//! Provisioning pipeline for a new gazetteer geocoding database.
//!
//! The bootstrap is a strictly ordered, single-shot sequence: create the
//! database, install the extensions, install and verify the native
//! normalisation module, load the static country data, then drive the bulk
//! OSM import. Each stage is a hard precondition for the next; the first
//! failure aborts the whole run and the operator re-runs from the top after
//! fixing the reported problem. Nothing here retries.
//!
//! Every stage talks to the outside world through the capability traits in
//! `gazetteer-core` ([`DbSession`](gazetteer_core::DbSession),
//! [`Connector`](gazetteer_core::Connector),
//! [`ProcessRunner`](gazetteer_core::ProcessRunner)), so the whole pipeline
//! runs against in-memory stubs in tests.

#![forbid(unsafe_code)]

mod base_data;
mod error;
mod extensions;
mod import;
mod module;
mod provision;

pub use base_data::load_base_data;
pub use error::SetupError;
pub use extensions::setup_extensions;
pub use import::import_osm_data;
pub use module::{MODULE_FILE_NAME, install_module, verify_loadable};
pub use provision::create_database;

#[cfg(test)]
mod test_support;
