//! Victim selection, split out of [`super::Cache::operate`] one function
//! per policy so adding a third replacement algorithm later does not
//! touch the eviction path itself.

use super::Line;

/// Index of the line with the smallest `lru_clock` — the least recently
/// touched line in the set. A cache set always has at least one line, so
/// the fold below always has a seed to compare against.
#[must_use]
pub fn select_lru_victim(lines: &[Line]) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |victim, (i, l)| {
            if l.lru_clock < lines[victim].lru_clock {
                i
            } else {
                victim
            }
        })
}

/// Index of the line with the smallest `access_counter`, ties broken by
/// the smaller `lru_clock`.
#[must_use]
pub fn select_lfu_victim(lines: &[Line]) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |victim, (i, l)| {
            let key = (l.access_counter, l.lru_clock);
            let victim_key = (lines[victim].access_counter, lines[victim].lru_clock);
            if key < victim_key {
                i
            } else {
                victim
            }
        })
}
