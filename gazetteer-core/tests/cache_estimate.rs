use gazetteer_core::{HostMemory, estimate_cache_mb};
use rstest::rstest;

#[rstest]
#[case::memory_bound_wins(8_000_000_000, 0, 1_000_000_000, 1908)]
#[case::cached_memory_counts(4_000_000_000, 4_000_000_000, 1_000_000_000, 1908)]
#[case::tiny_input_floors_to_one(8_000_000_000, 0, 1024, 1)]
#[case::empty_input_floors_to_one(8_000_000_000, 0, 0, 1)]
fn estimates_expected_cache_size(
    #[case] available: u64,
    #[case] cached: u64,
    #[case] input_size: u64,
    #[case] expected_mb: u64,
) {
    let memory = HostMemory {
        available_bytes: available,
        cached_bytes: cached,
    };
    assert_eq!(estimate_cache_mb(memory, input_size), expected_mb);
}

#[test]
fn memory_fraction_caps_large_inputs() {
    // 2 GB of usable memory against a 100 GB input: the memory bound applies.
    let memory = HostMemory {
        available_bytes: 2_000_000_000,
        cached_bytes: 0,
    };
    let expected = 2_000_000_000 * 3 / 4 / (1024 * 1024) + 1;
    assert_eq!(estimate_cache_mb(memory, 100_000_000_000), expected);
}

#[test]
fn survives_extreme_inputs_without_overflow() {
    let memory = HostMemory {
        available_bytes: u64::MAX,
        cached_bytes: u64::MAX,
    };
    // Must not panic; the exact value is irrelevant at this magnitude.
    let _ = estimate_cache_mb(memory, u64::MAX);
}
