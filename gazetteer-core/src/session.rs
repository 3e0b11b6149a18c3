//! The narrow database capability surface consumed by the pipeline.
//!
//! Stages never see a concrete connection type; they operate on [`DbSession`]
//! so component tests can substitute an in-memory implementation. Connections
//! are scoped per stage via [`Connector`] and never held across stage
//! boundaries.

use std::error::Error as StdError;

use thiserror::Error;

use crate::version::VersionTuple;

/// A database operation failed for a reason the pipeline does not classify
/// further.
///
/// Stage-specific failures (missing role, outdated version, unloadable
/// module) get their own error kinds in `gazetteer-setup`; everything else
/// surfaces through this wrapper with the driver error as its source.
#[derive(Debug, Error)]
#[error("database operation failed: {source}")]
pub struct SessionError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl SessionError {
    /// Wrap a driver-level error.
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// A live session against the target database.
pub trait DbSession {
    /// Execute one or more SQL statements, discarding any result rows.
    fn execute(&mut self, statement: &str) -> Result<(), SessionError>;

    /// Run a query returning a single integer scalar.
    fn query_count(&mut self, statement: &str) -> Result<i64, SessionError>;

    /// Version tuple reported by the server engine.
    fn server_version(&mut self) -> Result<VersionTuple, SessionError>;

    /// Version tuple reported for an installed extension.
    ///
    /// Only meaningful once the extension exists; callers gate on this after
    /// `CREATE EXTENSION`.
    fn extension_version(&mut self, extension: &str) -> Result<VersionTuple, SessionError>;

    /// Make previous statements on this session durable.
    fn commit(&mut self) -> Result<(), SessionError>;

    /// Check whether a role with exactly the given name exists.
    fn role_exists(&mut self, role: &str) -> Result<bool, SessionError>;

    /// Drop a table if it exists.
    fn drop_table(&mut self, table: &str) -> Result<(), SessionError> {
        self.execute(&format!("DROP TABLE IF EXISTS \"{table}\""))
    }
}

/// Produces a fresh [`DbSession`] for each pipeline stage.
pub trait Connector {
    /// Session type produced by this connector.
    type Session: DbSession;

    /// Open a new session against the target database.
    fn connect(&self) -> Result<Self::Session, SessionError>;
}
