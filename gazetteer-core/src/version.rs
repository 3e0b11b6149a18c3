//! Version tuples and the gate that rejects servers below the supported
//! minimums.

use std::fmt;

use thiserror::Error;

/// Minimum supported version of the PostgreSQL engine.
pub const POSTGRES_REQUIRED_VERSION: VersionTuple = VersionTuple::new(9, 5);

/// Minimum supported version of the PostGIS extension.
pub const POSTGIS_REQUIRED_VERSION: VersionTuple = VersionTuple::new(2, 2);

/// A `(major, minor)` version pair, ordered lexicographically.
///
/// The derived ordering compares `major` first and `minor` second, so
/// `9.5 < 10.0` holds even though a string comparison would disagree.
///
/// # Examples
/// ```
/// use gazetteer_core::VersionTuple;
///
/// assert!(VersionTuple::new(9, 5) < VersionTuple::new(10, 0));
/// assert_eq!(VersionTuple::new(3, 4).to_string(), "3.4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTuple {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
}

impl VersionTuple {
    /// Construct a version tuple from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The independently versioned subsystems the bootstrap gates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    /// The relational engine itself.
    Postgres,
    /// The spatial extension loaded into the database.
    Postgis,
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("PostgreSQL"),
            Self::Postgis => f.write_str("PostGIS"),
        }
    }
}

/// Errors produced by the version gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The reported version is below the supported minimum.
    #[error("minimum supported version of {subsystem} is {required}, found {found}")]
    TooOld {
        /// Which subsystem reported the outdated version.
        subsystem: Subsystem,
        /// The version the server reported.
        found: VersionTuple,
        /// The minimum the bootstrap supports.
        required: VersionTuple,
    },
}

/// Check that `found` is at least `required` for the given subsystem.
///
/// Read-only and side-effect-free; the returned error carries both tuples so
/// the operator sees exactly what was compared.
///
/// # Errors
/// Returns [`VersionError::TooOld`] when `found < required`.
///
/// # Examples
/// ```
/// use gazetteer_core::{Subsystem, VersionTuple, require_at_least};
///
/// let found = VersionTuple::new(10, 0);
/// let required = VersionTuple::new(9, 5);
/// assert!(require_at_least(found, required, Subsystem::Postgres).is_ok());
/// assert!(require_at_least(required, found, Subsystem::Postgres).is_err());
/// ```
pub fn require_at_least(
    found: VersionTuple,
    required: VersionTuple,
    subsystem: Subsystem,
) -> Result<(), VersionError> {
    if found < required {
        return Err(VersionError::TooOld {
            subsystem,
            found,
            required,
        });
    }
    Ok(())
}
