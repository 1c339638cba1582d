//! The N-way set-associative data cache, returning a richer `Status`
//! result than a plain hit/miss bool: explicit hit/miss/eviction,
//! carrying the victim and insert block addresses for tracing.

pub mod policies;

use crate::common::addr::{block_addr, split_addr};
use crate::config::CacheConfig;

/// One line of a set: valid flag, tag, the block address it holds (kept
/// alongside the tag so eviction can report it), and the two timestamps
/// the replacement policies read.
#[derive(Clone, Copy, Debug, Default)]
pub struct Line {
    pub valid: bool,
    pub tag: u32,
    pub block_addr: u32,
    pub lru_clock: u64,
    pub access_counter: u64,
}

struct Set {
    lru_clock: u64,
    lines: Vec<Line>,
}

/// The outcome of one `operate` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Hit,
    Miss { insert_block_addr: u32 },
    Evict {
        victim_block_addr: u32,
        insert_block_addr: u32,
    },
}

impl Status {
    /// The stable `[status: ...]` trace line from the wire format.
    #[must_use]
    pub fn trace_line(self) -> String {
        match self {
            Status::Hit => "[status: hit]".to_string(),
            Status::Miss { insert_block_addr } => {
                format!("[status: miss, insert_block: {insert_block_addr:#x}]")
            }
            Status::Evict {
                victim_block_addr,
                insert_block_addr,
            } => format!(
                "[status: miss eviction, victim_block: {victim_block_addr:#x}, insert_block: {insert_block_addr:#x}]"
            ),
        }
    }
}

/// An N-way set-associative cache with configurable geometry and
/// LRU/LFU replacement.
pub struct Cache {
    set_bits: u32,
    block_bits: u32,
    lfu: bool,
    sets: Vec<Set>,
    pub hit_count: u64,
    pub miss_count: u64,
    pub eviction_count: u64,
}

impl Cache {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let num_sets = 1usize << config.set_bits;
        let lines_per_set = config.lines_per_set as usize;
        let sets = (0..num_sets)
            .map(|_| Set {
                lru_clock: 0,
                lines: vec![Line::default(); lines_per_set],
            })
            .collect();
        Self {
            set_bits: config.set_bits,
            block_bits: config.block_bits,
            lfu: config.lfu,
            sets,
            hit_count: 0,
            miss_count: 0,
            eviction_count: 0,
        }
    }

    /// Runs one access through the cache: probe, fill, or evict, per
    /// §4.8's algorithm.
    pub fn operate(&mut self, address: u32) -> Status {
        let split = split_addr(address, self.set_bits, self.block_bits);
        let set = &mut self.sets[split.set_index as usize];
        set.lru_clock += 1;

        if let Some(line) = set
            .lines
            .iter_mut()
            .find(|l| l.valid && l.tag == split.tag)
        {
            if self.lfu {
                line.access_counter += 1;
            } else {
                line.lru_clock = set.lru_clock;
            }
            self.hit_count += 1;
            return Status::Hit;
        }

        let target_block = block_addr(address, self.block_bits);

        if let Some(line) = set.lines.iter_mut().find(|l| !l.valid) {
            *line = Line {
                valid: true,
                tag: split.tag,
                block_addr: target_block,
                lru_clock: set.lru_clock,
                access_counter: 1,
            };
            self.miss_count += 1;
            return Status::Miss {
                insert_block_addr: target_block,
            };
        }

        let victim_idx = if self.lfu {
            policies::select_lfu_victim(&set.lines)
        } else {
            policies::select_lru_victim(&set.lines)
        };
        let victim_block = set.lines[victim_idx].block_addr;
        set.lines[victim_idx] = Line {
            valid: true,
            tag: split.tag,
            block_addr: target_block,
            lru_clock: set.lru_clock,
            access_counter: 1,
        };
        self.miss_count += 1;
        self.eviction_count += 1;
        Status::Evict {
            victim_block_addr: victim_block,
            insert_block_addr: target_block,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn cold_accesses_miss_then_hit() {
        let mut cache = Cache::new(&direct_config(0, 2, 2, false));
        assert_eq!(
            cache.operate(0x00),
            Status::Miss {
                insert_block_addr: 0x00
            }
        );
        assert_eq!(cache.operate(0x00), Status::Hit);
    }

    #[test]
    fn lru_evicts_least_recently_touched() {
        // s=0, E=2, b=2: accesses to 0x00, 0x10, 0x20.
        let mut cache = Cache::new(&direct_config(0, 2, 2, false));
        assert_eq!(
            cache.operate(0x00),
            Status::Miss {
                insert_block_addr: 0x00
            }
        );
        assert_eq!(
            cache.operate(0x10),
            Status::Miss {
                insert_block_addr: 0x10
            }
        );
        assert_eq!(
            cache.operate(0x20),
            Status::Evict {
                victim_block_addr: 0x00,
                insert_block_addr: 0x20,
            }
        );
    }

    #[test]
    fn lfu_tie_break_favors_fewer_touches() {
        // s=0, E=2, b=2, lfu=1: 0x00, 0x00, 0x10, 0x10, 0x10, 0x20.
        let mut cache = Cache::new(&direct_config(0, 2, 2, true));
        cache.operate(0x00); // miss, fill
        cache.operate(0x00); // hit, access_counter=2
        cache.operate(0x10); // miss, fill
        cache.operate(0x10); // hit, access_counter=2
        cache.operate(0x10); // hit, access_counter=3
        assert_eq!(
            cache.operate(0x20),
            Status::Evict {
                victim_block_addr: 0x00,
                insert_block_addr: 0x20,
            }
        );
    }

    #[test]
    fn accounting_invariant_holds() {
        let mut cache = Cache::new(&direct_config(0, 2, 2, false));
        for addr in [0x00, 0x10, 0x20, 0x00, 0x10] {
            cache.operate(addr);
        }
        assert_eq!(cache.hit_count + cache.miss_count, 5);
        assert!(cache.eviction_count <= cache.miss_count);
    }
}
