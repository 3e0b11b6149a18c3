//! Error taxonomy for the provisioning pipeline.
//!
//! One variant per failure kind, each carrying the structured context needed
//! for an actionable diagnostic. The pipeline is operator-driven: a failure
//! is expected to be fixed externally and the whole run repeated, so no
//! variant is ever caught and continued past.

use std::{io, path::PathBuf};

use gazetteer_core::{ProcessError, ProcessStatus, SessionError, VersionError};
use thiserror::Error;

/// Errors surfaced by the provisioning stages.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The external database-creation command exited non-zero.
    #[error(
        "creating the new database failed ({status}); the database may already \
         exist, and no cleanup was attempted"
    )]
    CreationFailed {
        /// How the creation command exited.
        status: ProcessStatus,
    },
    /// The engine or an extension is below the supported minimum.
    #[error(transparent)]
    VersionTooOld(#[from] VersionError),
    /// The requested read-only role does not exist on the server.
    #[error("read-only role '{role}' does not exist; create it with: createuser {role}")]
    MissingRole {
        /// The role that was looked up.
        role: String,
    },
    /// Copying the native module into place failed.
    #[error("failed to install the database module at {path:?}")]
    ModuleInstall {
        /// Path involved in the failed filesystem operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The server cannot load the native module from the resolved path.
    #[error(
        "the database server cannot load the module from {path:?}; check that \
         the file exists, is readable by the server, and matches its architecture"
    )]
    ModuleNotLoadable {
        /// Module directory that failed the load check.
        path: PathBuf,
        /// Error reported while defining the probe function.
        #[source]
        source: SessionError,
    },
    /// A static base-data resource could not be read.
    #[error("failed to read base data resource {path:?}")]
    BaseData {
        /// Resource file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The import input file could not be inspected.
    #[error("failed to inspect input file {path:?}")]
    InputFile {
        /// The input file handed to the importer.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The external bulk importer reported failure.
    #[error("the bulk importer failed ({status}); the import is not resumable, re-run the setup")]
    ImporterFailed {
        /// How the importer exited.
        status: ProcessStatus,
    },
    /// The importer reported success but produced no rows.
    #[error(
        "the bulk importer reported success but no data landed in the place \
         table; check that the input file contains usable data"
    )]
    NoDataImported,
    /// Deleting the temporary flatnode file failed.
    #[error("failed to remove flatnode file {path:?}")]
    RemoveFlatnode {
        /// The flatnode file scheduled for deletion.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An external helper could not be launched.
    #[error(transparent)]
    Process(#[from] ProcessError),
    /// An unclassified database operation failed.
    #[error(transparent)]
    Db(#[from] SessionError),
}
