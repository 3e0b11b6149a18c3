//! Configuration record handed to the external bulk importer.

use std::path::{Path, PathBuf};

use crate::memory::{HostMemory, estimate_cache_mb};

/// Settings for an `osm2pgsql` bulk import run.
///
/// Constructed by the caller, then passed through [`ImportOptions::finalized`]
/// immediately before the importer is launched. `cache_size_mb == 0` means
/// "unset"; a flatnode file and an in-memory cache are mutually exclusive
/// strategies, so configuring the former suppresses estimation of the latter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Importer binary; resolved through `PATH` when left at the default.
    pub osm2pgsql: PathBuf,
    /// Optional tag-processing style file passed to the importer.
    pub style: Option<PathBuf>,
    /// Input OSM file; populated by [`ImportOptions::finalized`].
    pub input_file: Option<PathBuf>,
    /// Disk-backed node cache file, if the caller chose one.
    pub flatnode_file: Option<PathBuf>,
    /// In-memory node cache size in megabytes; 0 means unset.
    pub cache_size_mb: u64,
    /// Whether to append to existing data instead of creating it.
    pub append: bool,
    /// Importer worker thread count.
    pub threads: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            osm2pgsql: PathBuf::from("osm2pgsql"),
            style: None,
            input_file: None,
            flatnode_file: None,
            cache_size_mb: 0,
            append: false,
            threads: 1,
        }
    }
}

impl ImportOptions {
    /// Whether the cache-size heuristic applies to these options.
    ///
    /// True only when the caller supplied neither an explicit cache size nor
    /// a flatnode file.
    #[must_use]
    pub const fn needs_cache_estimate(&self) -> bool {
        self.cache_size_mb == 0 && self.flatnode_file.is_none()
    }

    /// Produce the record actually handed to the importer.
    ///
    /// This is a pure transformation of the caller's settings: the input file
    /// is filled in, append mode is forced off (bootstrap runs are always a
    /// first full load), the importer is forced single-threaded, and the
    /// cache size is estimated from `memory` and `input_size_bytes` when the
    /// caller left both cache strategies unset.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use gazetteer_core::{HostMemory, ImportOptions};
    ///
    /// let options = ImportOptions {
    ///     append: true,
    ///     threads: 8,
    ///     ..ImportOptions::default()
    /// };
    /// let memory = HostMemory {
    ///     available_bytes: 8_000_000_000,
    ///     cached_bytes: 0,
    /// };
    /// let finalized = options.finalized(Path::new("planet.osm.pbf"), memory, 1_000_000_000);
    /// assert!(!finalized.append);
    /// assert_eq!(finalized.threads, 1);
    /// assert_eq!(finalized.cache_size_mb, 1908);
    /// ```
    #[must_use]
    pub fn finalized(
        &self,
        input_file: &Path,
        memory: HostMemory,
        input_size_bytes: u64,
    ) -> Self {
        let mut next = self.clone();
        next.input_file = Some(input_file.to_path_buf());
        next.append = false;
        next.threads = 1;
        if next.needs_cache_estimate() {
            next.cache_size_mb = estimate_cache_mb(memory, input_size_bytes);
        }
        next
    }
}
