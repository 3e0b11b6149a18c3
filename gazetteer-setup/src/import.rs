//! Stage five: drive the external bulk importer and verify its output.

use std::{fs, path::Path};

use gazetteer_core::{
    ConnectionTarget, Connector, DbSession, HostMemory, ImportOptions, ProcessRequest,
    ProcessRunner,
};
use log::{debug, info};

use crate::error::SetupError;

/// Import an OSM file through `osm2pgsql`.
///
/// The caller's options are finalised first: the input file is injected,
/// append mode is forced off, and the importer is forced single-threaded --
/// its worker threads are not coordinated with this pipeline, so concurrency
/// is disabled rather than managed. When neither a cache size nor a flatnode
/// file was configured, the cache is sized from live host memory and the
/// input file size.
///
/// After the importer finishes, the `place` table must contain at least one
/// row; an importer that "succeeds" without producing data would otherwise
/// silently yield an empty geocoding database. On success with `drop_scratch`
/// set, the importer's node scratch table is dropped and a configured
/// flatnode file deleted.
///
/// # Errors
/// [`SetupError::ImporterFailed`] when the importer exits non-zero (no retry;
/// bulk imports are too expensive and not resumable from this layer), and
/// [`SetupError::NoDataImported`] when it succeeds but the `place` table is
/// empty.
pub fn import_osm_data<R, C>(
    runner: &R,
    connector: &C,
    target: &ConnectionTarget,
    osm_file: &Path,
    options: &ImportOptions,
    drop_scratch: bool,
) -> Result<(), SetupError>
where
    R: ProcessRunner + ?Sized,
    C: Connector,
{
    let input_size = fs::metadata(osm_file)
        .map_err(|source| SetupError::InputFile {
            path: osm_file.to_path_buf(),
            source,
        })?
        .len();

    let memory = if options.needs_cache_estimate() {
        probe_host_memory()
    } else {
        HostMemory::default()
    };
    let finalized = options.finalized(osm_file, memory, input_size);
    debug!(
        "importing {} with cache size {} MB",
        osm_file.display(),
        finalized.cache_size_mb
    );

    let status = runner.run(&importer_request(target, &finalized, osm_file))?;
    if !status.success() {
        return Err(SetupError::ImporterFailed { status });
    }

    let mut session = connector.connect()?;
    if session.query_count("SELECT count(*) FROM place")? == 0 {
        return Err(SetupError::NoDataImported);
    }

    if drop_scratch {
        session.drop_table("planet_osm_nodes")?;
        if let Some(flatnode) = &finalized.flatnode_file {
            info!("removing flatnode file {}", flatnode.display());
            fs::remove_file(flatnode).map_err(|source| SetupError::RemoveFlatnode {
                path: flatnode.clone(),
                source,
            })?;
        }
    }

    Ok(())
}

/// Build the importer invocation from the finalised options.
fn importer_request(
    target: &ConnectionTarget,
    options: &ImportOptions,
    osm_file: &Path,
) -> ProcessRequest {
    let mut request = ProcessRequest::new(options.osm2pgsql.to_string_lossy())
        .arg("--hstore")
        .arg("--latlong")
        .arg("--slim")
        .arg(if options.append { "--append" } else { "--create" })
        .arg("--output")
        .arg("gazetteer")
        .arg("--number-processes")
        .arg(options.threads.to_string())
        .arg("--cache")
        .arg(options.cache_size_mb.to_string());
    if let Some(style) = &options.style {
        request = request.arg("--style").arg(style.to_string_lossy());
    }
    if let Some(flatnode) = &options.flatnode_file {
        request = request.arg("--flat-nodes").arg(flatnode.to_string_lossy());
    }
    request
        .arg(osm_file.to_string_lossy())
        .envs(target.client_env())
}

/// One-instant snapshot of free plus reclaimable host memory.
///
/// `sysinfo`'s available figure already includes reclaimable cache; the
/// cached share is estimated as available minus free so the estimator sees
/// the same two inputs the heuristic was tuned on.
fn probe_host_memory() -> HostMemory {
    use sysinfo::{MemoryRefreshKind, System};

    let mut system = System::new();
    system.refresh_memory_specifics(MemoryRefreshKind::everything());
    let available = system.available_memory();
    HostMemory {
        available_bytes: available,
        cached_bytes: available.saturating_sub(system.free_memory()),
    }
}
