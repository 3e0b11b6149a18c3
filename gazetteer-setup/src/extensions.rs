//! Stage two: install the database extensions the geocoder relies on.

use gazetteer_core::{
    DbSession, POSTGIS_REQUIRED_VERSION, Subsystem, VersionTuple, require_at_least,
};

use crate::error::SetupError;

/// Ensure the `hstore` and `postgis` extensions exist and are recent enough.
///
/// Creation uses `IF NOT EXISTS`, so running this against an already-extended
/// database is safe. The PostGIS version is only knowable once the extension
/// exists, which is why its gate lives here rather than next to the engine
/// check. Returns the PostGIS version that passed the gate.
///
/// # Errors
/// [`SetupError::VersionTooOld`] when PostGIS is below the minimum; extension
/// creation failures (for example a missing server-side package) propagate as
/// [`SetupError::Db`].
pub fn setup_extensions<S>(session: &mut S) -> Result<VersionTuple, SetupError>
where
    S: DbSession + ?Sized,
{
    session.execute("CREATE EXTENSION IF NOT EXISTS hstore")?;
    session.execute("CREATE EXTENSION IF NOT EXISTS postgis")?;
    session.commit()?;

    let postgis = session.extension_version("postgis")?;
    require_at_least(postgis, POSTGIS_REQUIRED_VERSION, Subsystem::Postgis)?;
    Ok(postgis)
}
