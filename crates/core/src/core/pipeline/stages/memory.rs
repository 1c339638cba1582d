//! Memory: dispatch the load/store width, consult the cache for
//! latency, and drive `pcsrc`/the branch target back to the driver.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::memory::Memory;
use crate::core::pipeline::lane::Lane;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::units::cache::Cache;
use crate::isa::opcodes::funct3;

/// What memory resolved about a control-transfer instruction this
/// cycle, for the driver to fold across lanes and redirect `pc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchOutcome {
    pub taken: bool,
    pub target: u32,
}

/// Extra cycles this access charges beyond the baseline one cycle per
/// tick, and whether the cache was consulted at all (ecalls and
/// register-only instructions never touch it).
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryLatency {
    pub extra_cycles: u32,
    pub cache_trace: Option<String>,
}

/// Runs memory for one lane.
pub fn memory_stage(
    lane: &mut Lane,
    memory: &mut Memory,
    cache: &mut Cache,
    config: &Config,
) -> Result<(BranchOutcome, MemoryLatency), SimError> {
    let ex_mem = lane.ex_mem.out;
    let mut latency = MemoryLatency::default();
    let mut mem_data = 0u32;

    if ex_mem.ctrl.mem_read || ex_mem.ctrl.mem_write {
        latency.extra_cycles += config.mem_latency;
        let status = cache.operate(ex_mem.alu_result);
        latency.extra_cycles += match status {
            crate::core::units::cache::Status::Hit => config.cache.hit_latency,
            _ => config.cache.miss_latency,
        };
        if config.trace.print_cache_traces {
            latency.cache_trace = Some(status.trace_line());
        }
    }

    if ex_mem.ctrl.mem_read {
        let (width, signed) = load_width(ex_mem.ctrl.funct3);
        mem_data = memory.load(ex_mem.alu_result, width, signed)?;
    } else if ex_mem.ctrl.mem_write {
        let width = store_width(ex_mem.ctrl.funct3);
        memory.store(ex_mem.alu_result, width, ex_mem.store_data)?;
    }

    lane.mem_wb.inp = MemWbEntry {
        pc: ex_mem.pc,
        word: ex_mem.word,
        rd: ex_mem.rd,
        alu_result: ex_mem.alu_result,
        mem_data,
        ctrl: ex_mem.ctrl,
    };

    let outcome = BranchOutcome {
        taken: ex_mem.taken,
        target: ex_mem.branch_target,
    };
    Ok((outcome, latency))
}

/// Load width/signedness per §4.7: byte, half, and word, all
/// sign-extended except word (which already fills the register).
fn load_width(f3: u32) -> (u32, bool) {
    match f3 {
        funct3::LB => (1, true),
        funct3::LH => (2, true),
        _ => (4, false),
    }
}

fn store_width(f3: u32) -> u32 {
    match f3 {
        funct3::SB => 1,
        funct3::SH => 2,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::core::pipeline::latches::ExMemEntry;
    use crate::core::pipeline::signals::ControlSignals;

    #[test]
    fn load_byte_reads_through_cache() {
        let mut lane = Lane::new();
        let mut mem = Memory::new(vec![0xAB, 0, 0, 0, 0, 0, 0, 0]);
        let mut cache = Cache::new(&CacheConfig::default());
        let config = Config::default();
        lane.ex_mem.out = ExMemEntry {
            alu_result: 0,
            ctrl: ControlSignals {
                mem_read: true,
                mem_to_reg: true,
                funct3: funct3::LB,
                ..ControlSignals::bubble()
            },
            ..Default::default()
        };
        memory_stage(&mut lane, &mut mem, &mut cache, &config).unwrap();
        assert_eq!(lane.mem_wb.inp.mem_data, 0xFFFF_FFAB);
    }

    #[test]
    fn non_memory_instruction_never_touches_cache() {
        let mut lane = Lane::new();
        let mut mem = Memory::new(vec![0; 8]);
        let mut cache = Cache::new(&CacheConfig::default());
        let config = Config::default();
        lane.ex_mem.out = ExMemEntry::default();
        let (_, latency) = memory_stage(&mut lane, &mut mem, &mut cache, &config).unwrap();
        assert_eq!(latency.extra_cycles, 0);
    }
}
