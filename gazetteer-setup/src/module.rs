//! Stage three: install the native text-normalisation module and prove the
//! server can load it.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gazetteer_core::DbSession;
use log::info;

use crate::error::SetupError;

/// File name of the native module inside its directory.
pub const MODULE_FILE_NAME: &str = "gazetteer.so";

/// Install the native module and return the directory the server should load
/// it from.
///
/// When `module_dir` is given, that path is trusted verbatim and nothing is
/// copied; pair it with [`verify_loadable`] to catch a bad override early.
/// Otherwise the module is copied from `src_dir` into `project_dir/module`
/// with the executable bit set. An existing destination is treated as a stale
/// prior install and overwritten, except when it is the same physical
/// location as `src_dir` (running from the build tree), in which case copying
/// would be a self-overwrite and is skipped.
///
/// # Errors
/// [`SetupError::ModuleInstall`] when any filesystem step fails.
pub fn install_module(
    src_dir: &Path,
    project_dir: &Path,
    module_dir: Option<&Path>,
) -> Result<PathBuf, SetupError> {
    if let Some(dir) = module_dir {
        info!("using custom path for the database module at {}", dir.display());
        return Ok(dir.to_path_buf());
    }

    let target = project_dir.join("module");
    if target.exists() && is_same_location(src_dir, &target)? {
        info!("running from the build directory; leaving the database module as is");
        return Ok(target);
    }

    if !target.exists() {
        fs::create_dir(&target).map_err(|source| SetupError::ModuleInstall {
            path: target.clone(),
            source,
        })?;
    }

    let destination = target.join(MODULE_FILE_NAME);
    fs::copy(src_dir.join(MODULE_FILE_NAME), &destination).map_err(|source| {
        SetupError::ModuleInstall {
            path: destination.clone(),
            source,
        }
    })?;
    set_executable(&destination).map_err(|source| SetupError::ModuleInstall {
        path: destination.clone(),
        source,
    })?;

    info!("database module installed at {}", destination.display());
    Ok(target)
}

/// Check that the server can actually load the module from `module_dir`.
///
/// Defines a throwaway C function bound to the module's transliteration
/// symbol and drops it again in the same statement batch. Any failure means
/// the server cannot use the module from that path (wrong architecture,
/// permissions, or a missing file) and is surfaced as a distinct error so the
/// problem is caught before the expensive bulk import begins.
///
/// # Errors
/// [`SetupError::ModuleNotLoadable`] when the probe function cannot be
/// defined.
pub fn verify_loadable<S>(session: &mut S, module_dir: &Path) -> Result<(), SetupError>
where
    S: DbSession + ?Sized,
{
    let statement = format!(
        "CREATE FUNCTION gazetteer_module_check(text) \
         RETURNS text AS '{dir}/{MODULE_FILE_NAME}', 'transliteration' \
         LANGUAGE c IMMUTABLE STRICT; \
         DROP FUNCTION gazetteer_module_check(text)",
        dir = module_dir.display()
    );
    session
        .execute(&statement)
        .map_err(|source| SetupError::ModuleNotLoadable {
            path: module_dir.to_path_buf(),
            source,
        })
}

/// Physical path identity, not string equality: both sides are canonicalised
/// so symlinked build trees are still recognised as the same location.
fn is_same_location(lhs: &Path, rhs: &Path) -> Result<bool, SetupError> {
    let lhs_real = fs::canonicalize(lhs).map_err(|source| SetupError::ModuleInstall {
        path: lhs.to_path_buf(),
        source,
    })?;
    let rhs_real = fs::canonicalize(rhs).map_err(|source| SetupError::ModuleInstall {
        path: rhs.to_path_buf(),
        source,
    })?;
    Ok(lhs_real == rhs_real)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
