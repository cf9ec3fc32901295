use super::*;

#[test]
fn first_store_is_never_a_skip() {
    let mut cache = UniformValueCache::new(16);
    assert!(!cache.check_and_store(0, &[1, 2, 3, 4]));
}

#[test]
fn identical_bytes_are_skipped() {
    let mut cache = UniformValueCache::new(16);
    assert!(!cache.check_and_store(4, &[9, 9, 9, 9]));
    assert!(cache.check_and_store(4, &[9, 9, 9, 9]));
}

#[test]
fn changed_bytes_are_stored_again() {
    let mut cache = UniformValueCache::new(16);
    assert!(!cache.check_and_store(0, &[1, 2, 3, 4]));
    assert!(!cache.check_and_store(0, &[1, 2, 3, 5]));
    assert!(cache.check_and_store(0, &[1, 2, 3, 5]));
}

#[test]
fn zero_bytes_are_distinct_from_unwritten() {
    let mut cache = UniformValueCache::new(8);
    // The buffer starts zeroed but unwritten, so storing zeros must not skip.
    assert!(!cache.check_and_store(0, &[0, 0, 0, 0]));
    assert!(cache.check_and_store(0, &[0, 0, 0, 0]));
}

#[test]
fn adjacent_regions_are_independent() {
    let mut cache = UniformValueCache::new(8);
    assert!(!cache.check_and_store(0, &[7, 7, 7, 7]));
    assert!(!cache.check_and_store(4, &[7, 7, 7, 7]));
    assert!(cache.check_and_store(0, &[7, 7, 7, 7]));
}

#[test]
fn partial_overlap_invalidates_the_skip() {
    let mut cache = UniformValueCache::new(8);
    assert!(!cache.check_and_store(0, &[1, 1, 1, 1, 1, 1, 1, 1]));
    assert!(!cache.check_and_store(2, &[2, 2]));
    assert!(!cache.check_and_store(0, &[1, 1, 1, 1, 1, 1, 1, 1]));
}

#[test]
fn out_of_range_never_skips() {
    let mut cache = UniformValueCache::new(4);
    assert!(!cache.check_and_store(2, &[1, 2, 3, 4]));
    assert!(!cache.check_and_store(2, &[1, 2, 3, 4]));
}
