//! Resource-sizing heuristic for the bulk importer's node cache.

/// Host-wide memory statistics at one instant.
///
/// The split mirrors what the importer cares about: memory that is free right
/// now, plus page cache the kernel can reclaim under pressure. The reading is
/// advisory, not a reservation, so no synchronisation with the host is
/// attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostMemory {
    /// Memory immediately available to new allocations, in bytes.
    pub available_bytes: u64,
    /// Reclaimable cache memory, in bytes.
    pub cached_bytes: u64,
}

/// Estimate a safe importer cache size in megabytes.
///
/// The budget is bounded by both three quarters of the free-plus-reclaimable
/// memory (so the database and OS are not starved) and twice the input file
/// size (so small inputs do not over-allocate). Callers only invoke this when
/// neither an explicit cache size nor a disk-backed node cache was
/// configured.
///
/// # Examples
/// ```
/// use gazetteer_core::{HostMemory, estimate_cache_mb};
///
/// let memory = HostMemory {
///     available_bytes: 8_000_000_000,
///     cached_bytes: 0,
/// };
/// assert_eq!(estimate_cache_mb(memory, 1_000_000_000), 1908);
///
/// // A tiny input keeps the cache at the 1 MB floor regardless of free RAM.
/// assert_eq!(estimate_cache_mb(memory, 1024), 1);
/// ```
#[must_use]
pub fn estimate_cache_mb(memory: HostMemory, input_size_bytes: u64) -> u64 {
    let pool = u128::from(memory.available_bytes) + u128::from(memory.cached_bytes);
    let memory_budget = pool * 3 / 4;
    let input_cap = u128::from(input_size_bytes) * 2;
    let megabytes = memory_budget.min(input_cap) / (1024 * 1024);
    u64::try_from(megabytes).unwrap_or(u64::MAX).saturating_add(1)
}
