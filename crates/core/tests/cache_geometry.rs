//! Parameterized cache-replacement tests across several geometries,
//! exercising the accounting invariants
//! (`hits + misses == accesses`, `evictions <= misses`) beyond the
//! single geometry the in-module unit tests cover.

use pipe5_core::config::CacheConfig;
use pipe5_core::core::units::cache::{Cache, Status};
use rstest::rstest;

fn direct_config(set_bits: u32, lines_per_set: u32, block_bits: u32, lfu: bool) -> CacheConfig {
    CacheConfig {
        set_bits,
        lines_per_set,
        block_bits,
        lfu,
        hit_latency: 0,
        miss_latency: 10,
    }
}

#[rstest]
#[case(0, 1, 2)] // direct-mapped, single set
#[case(0, 4, 2)] // fully associative, single set
#[case(2, 2, 2)] // four sets, two ways
#[case(3, 1, 4)] // eight direct-mapped sets, larger blocks
fn accounting_invariant_holds_across_geometries(
    #[case] set_bits: u32,
    #[case] lines_per_set: u32,
    #[case] block_bits: u32,
) {
    let mut cache = Cache::new(&direct_config(set_bits, lines_per_set, block_bits, false));
    let block = 1u32 << block_bits;
    let addrs: Vec<u32> = (0..64).map(|i| i * block).collect();
    for &addr in &addrs {
        cache.operate(addr);
    }
    // Repeat the same sweep: every address is now resident somewhere
    // (possibly evicted again by the second pass), so hits + misses
    // must still total every access issued.
    for &addr in &addrs {
        cache.operate(addr);
    }
    assert_eq!(cache.hit_count + cache.miss_count, (addrs.len() * 2) as u64);
    assert!(cache.eviction_count <= cache.miss_count);
}

#[rstest]
#[case(false)] // LRU
#[case(true)] // LFU
fn repeated_single_line_access_is_always_a_hit_after_fill(#[case] lfu: bool) {
    let mut cache = Cache::new(&direct_config(0, 1, 2, lfu));
    assert!(matches!(cache.operate(0x00), Status::Miss { .. }));
    for _ in 0..10 {
        assert_eq!(cache.operate(0x00), Status::Hit);
    }
    assert_eq!(cache.hit_count, 10);
    assert_eq!(cache.eviction_count, 0);
}
