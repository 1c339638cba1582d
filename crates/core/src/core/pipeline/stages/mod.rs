//! The five stage transfer functions, one module each, called in the
//! fixed order the two-phase latch discipline requires: fetch, decode,
//! execute, memory, writeback. Each operates on a single [`super::lane::Lane`]
//! and the shared architectural state (registers, memory, cache); none
//! of them know whether a second lane exists.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;
