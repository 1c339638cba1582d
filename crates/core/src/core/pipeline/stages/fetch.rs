//! Fetch: read one 32-bit word at `pc` and latch it with its own
//! address. Everything else about the instruction is decode's job.

use crate::common::error::SimError;
use crate::core::memory::Memory;
use crate::core::pipeline::lane::Lane;
use crate::core::pipeline::latches::IfIdEntry;

/// Fetches the word at `pc` into `lane.if_id.inp`.
pub fn fetch_stage(lane: &mut Lane, pc: u32, memory: &Memory) -> Result<(), SimError> {
    let word = memory.fetch_word(pc)?;
    lane.if_id.inp = IfIdEntry { pc, word };
    Ok(())
}
