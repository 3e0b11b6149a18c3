use std::path::{Path, PathBuf};

use gazetteer_core::{HostMemory, ImportOptions};
use rstest::{fixture, rstest};

#[fixture]
fn memory() -> HostMemory {
    HostMemory {
        available_bytes: 8_000_000_000,
        cached_bytes: 0,
    }
}

#[rstest]
fn fills_cache_size_when_neither_strategy_is_set(memory: HostMemory) {
    let options = ImportOptions::default();
    assert!(options.needs_cache_estimate());

    let finalized = options.finalized(Path::new("extract.osm.pbf"), memory, 1_000_000_000);
    assert_eq!(finalized.cache_size_mb, 1908);
    assert_eq!(
        finalized.input_file.as_deref(),
        Some(Path::new("extract.osm.pbf"))
    );
}

#[rstest]
fn keeps_an_explicit_cache_size(memory: HostMemory) {
    let options = ImportOptions {
        cache_size_mb: 512,
        ..ImportOptions::default()
    };
    let finalized = options.finalized(Path::new("extract.osm.pbf"), memory, 1_000_000_000);
    assert_eq!(finalized.cache_size_mb, 512);
}

#[rstest]
fn flatnode_file_suppresses_estimation(memory: HostMemory) {
    let options = ImportOptions {
        flatnode_file: Some(PathBuf::from("/tmp/nodes.cache")),
        ..ImportOptions::default()
    };
    assert!(!options.needs_cache_estimate());

    let finalized = options.finalized(Path::new("extract.osm.pbf"), memory, 1_000_000_000);
    assert_eq!(finalized.cache_size_mb, 0);
    assert_eq!(
        finalized.flatnode_file.as_deref(),
        Some(Path::new("/tmp/nodes.cache"))
    );
}

#[rstest]
fn forces_full_single_threaded_load(memory: HostMemory) {
    let options = ImportOptions {
        append: true,
        threads: 16,
        ..ImportOptions::default()
    };
    let finalized = options.finalized(Path::new("extract.osm.pbf"), memory, 1024);
    assert!(!finalized.append);
    assert_eq!(finalized.threads, 1);
}

#[rstest]
fn leaves_the_original_options_untouched(memory: HostMemory) {
    let options = ImportOptions::default();
    let _ = options.finalized(Path::new("extract.osm.pbf"), memory, 1024);
    assert_eq!(options, ImportOptions::default());
}
