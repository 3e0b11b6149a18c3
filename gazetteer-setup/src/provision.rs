//! Stage one: create the target database and validate the server.

use gazetteer_core::{
    ConnectionTarget, Connector, DbSession, POSTGRES_REQUIRED_VERSION, ProcessRequest,
    ProcessRunner, Subsystem, require_at_least,
};
use log::info;

use crate::error::SetupError;

/// Create the target database and check it is usable.
///
/// Runs `createdb` with the target's libpq environment, then connects and
/// gates on the minimum supported engine version. When `ro_role` is given,
/// additionally checks that a role with exactly that name exists so the
/// read-only frontend can connect later.
///
/// Creation is not idempotent: the database must not already exist, and a
/// failed creation leaves whatever `createdb` left behind for the operator to
/// clean up. The caller needs superuser-equivalent rights on the server; that
/// is a precondition, not something this function enforces.
///
/// # Errors
/// [`SetupError::CreationFailed`] when `createdb` exits non-zero,
/// [`SetupError::VersionTooOld`] when the engine is below the minimum, and
/// [`SetupError::MissingRole`] when the requested read-only role is absent.
pub fn create_database<R, C>(
    runner: &R,
    connector: &C,
    target: &ConnectionTarget,
    ro_role: Option<&str>,
) -> Result<(), SetupError>
where
    R: ProcessRunner + ?Sized,
    C: Connector,
{
    let request = ProcessRequest::new("createdb").envs(target.client_env());
    let status = runner.run(&request)?;
    if !status.success() {
        return Err(SetupError::CreationFailed { status });
    }

    let mut session = connector.connect()?;
    let server = session.server_version()?;
    require_at_least(server, POSTGRES_REQUIRED_VERSION, Subsystem::Postgres)?;
    info!("created database '{}' on PostgreSQL {server}", target.dbname);

    if let Some(role) = ro_role {
        if !session.role_exists(role)? {
            return Err(SetupError::MissingRole {
                role: role.to_owned(),
            });
        }
    }

    Ok(())
}
