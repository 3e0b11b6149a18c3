//! Stage four: load the static country reference data.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use flate2::read::GzDecoder;
use gazetteer_core::{Connector, DbSession};

use crate::error::SetupError;

const COUNTRY_NAME_RESOURCE: &str = "country_name.sql";
const COUNTRY_GRID_RESOURCE: &str = "country_osm_grid.sql.gz";

/// Create and populate the static tables that back geocoding.
///
/// The two resources in `sql_dir` are executed verbatim against an assumed
/// empty database. With `ignore_partitions`, every country row is afterwards
/// forced into partition zero, for installations that do not shard by
/// country. These are foundational reference tables and a partial load is not
/// recoverable in place, so there are no retries; any failure propagates
/// unchanged.
///
/// # Errors
/// [`SetupError::BaseData`] when a resource cannot be read, or
/// [`SetupError::Db`] when execution fails.
pub fn load_base_data<C>(
    connector: &C,
    sql_dir: &Path,
    ignore_partitions: bool,
) -> Result<(), SetupError>
where
    C: Connector,
{
    let mut session = connector.connect()?;
    execute_resource(&mut session, &sql_dir.join(COUNTRY_NAME_RESOURCE))?;
    execute_resource(&mut session, &sql_dir.join(COUNTRY_GRID_RESOURCE))?;

    if ignore_partitions {
        session.execute("UPDATE country_name SET partition = 0")?;
        session.commit()?;
    }

    Ok(())
}

fn execute_resource<S>(session: &mut S, path: &Path) -> Result<(), SetupError>
where
    S: DbSession + ?Sized,
{
    let statements = read_resource(path)?;
    session.execute(&statements)?;
    Ok(())
}

/// Read a resource file, transparently gunzipping `.gz` files.
fn read_resource(path: &Path) -> Result<String, SetupError> {
    let wrap = |source: io::Error| SetupError::BaseData {
        path: path.to_path_buf(),
        source,
    };

    let raw = fs::read(path).map_err(wrap)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        let mut decoded = String::new();
        GzDecoder::new(raw.as_slice())
            .read_to_string(&mut decoded)
            .map_err(wrap)?;
        Ok(decoded)
    } else {
        String::from_utf8(raw)
            .map_err(|err| wrap(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}
