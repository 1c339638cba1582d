//! Configuration for the simulator core.
//!
//! `Config` is the single record the driver consumes: cache geometry,
//! memory latency, pipeline width, and the tracing toggles. It is plain
//! data, `Deserialize`-able from a TOML file, with every field defaulted so
//! a partial (or absent) config file still produces a runnable simulator.

use serde::Deserialize;

/// Baseline constants used when a config file is absent or partial.
///
/// These reproduce the MS2 defaults of the C reference implementation:
/// no artificial memory latency, register-trace and stats on, cache-trace
/// off.
mod defaults {
    pub const CACHE_SET_BITS: u32 = 2;
    pub const CACHE_LINES_PER_SET: u32 = 2;
    pub const CACHE_BLOCK_BITS: u32 = 2;
    pub const CACHE_HIT_LATENCY: u32 = 0;
    pub const CACHE_MISS_LATENCY: u32 = 10;
    pub const MEM_LATENCY: u32 = 0;
    pub const PIPELINE_WIDTH: u32 = 1;
}

/// Set-associative cache geometry and replacement policy.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// `s`: log2 of the number of sets.
    #[serde(default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// `E`: lines per set (associativity).
    #[serde(default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: u32,

    /// `b`: log2 of the block size in bytes.
    #[serde(default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,

    /// `false` selects LRU eviction, `true` selects LFU.
    #[serde(default)]
    pub lfu: bool,

    /// Extra cycles charged on a cache hit.
    #[serde(default = "CacheConfig::default_hit_latency")]
    pub hit_latency: u32,

    /// Extra cycles charged on a cache miss or eviction.
    #[serde(default = "CacheConfig::default_miss_latency")]
    pub miss_latency: u32,
}

impl CacheConfig {
    fn default_set_bits() -> u32 {
        defaults::CACHE_SET_BITS
    }

    fn default_lines_per_set() -> u32 {
        defaults::CACHE_LINES_PER_SET
    }

    fn default_block_bits() -> u32 {
        defaults::CACHE_BLOCK_BITS
    }

    fn default_hit_latency() -> u32 {
        defaults::CACHE_HIT_LATENCY
    }

    fn default_miss_latency() -> u32 {
        defaults::CACHE_MISS_LATENCY
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_bits: defaults::CACHE_SET_BITS,
            lines_per_set: defaults::CACHE_LINES_PER_SET,
            block_bits: defaults::CACHE_BLOCK_BITS,
            lfu: false,
            hit_latency: defaults::CACHE_HIT_LATENCY,
            miss_latency: defaults::CACHE_MISS_LATENCY,
        }
    }
}

/// Runtime tracing toggles, one per independent diagnostic stream.
///
/// These replace the four `config.h` preprocessor macros
/// (`DEBUG_CYCLE`, `DEBUG_REG_TRACE`, `PRINT_STATS`, `PRINT_CACHE_TRACES`)
/// of the C reference implementation with fields the driver checks at
/// runtime.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TraceConfig {
    /// Emit the per-stage `[IF|ID|EX|MEM|WB]: ...` trace line every cycle.
    #[serde(default)]
    pub debug_cycle: bool,

    /// Emit a register dump at halt (and on fatal error).
    #[serde(default)]
    pub debug_reg_trace: bool,

    /// Emit the `SimStats` report at halt.
    #[serde(default)]
    pub print_stats: bool,

    /// Emit a `[status: ...]` line for every cache access.
    #[serde(default)]
    pub print_cache_traces: bool,
}

/// Root configuration consumed by `Cpu::new`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Data cache geometry and policy.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Extra cycles charged by the memory stage before consulting the
    /// cache, modeling a uniform DRAM-access floor.
    #[serde(default = "Config::default_mem_latency")]
    pub mem_latency: u32,

    /// Instructions fetched per cycle: 1 for single-issue, 2 to enable the
    /// dual-fetch extension.
    #[serde(default = "Config::default_pipeline_width")]
    pub pipeline_width: u32,

    /// Tracing toggles.
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    fn default_mem_latency() -> u32 {
        defaults::MEM_LATENCY
    }

    fn default_pipeline_width() -> u32 {
        defaults::PIPELINE_WIDTH
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            mem_latency: defaults::MEM_LATENCY,
            pipeline_width: defaults::PIPELINE_WIDTH,
            trace: TraceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_single_issue_lru() {
        let cfg = Config::default();
        assert_eq!(cfg.pipeline_width, 1);
        assert!(!cfg.cache.lfu);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("mem_latency = 5\n").unwrap();
        assert_eq!(cfg.mem_latency, 5);
        assert_eq!(cfg.cache.set_bits, 2);
        assert!(!cfg.trace.print_stats);
    }
}
