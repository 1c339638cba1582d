//! The cycle driver: owns architectural state (registers, memory, PC)
//! and the one or two [`Lane`]s of microarchitectural state, and runs
//! the eleven-step tick §4.5 specifies.

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::isa;
use crate::stats::SimStats;

use super::memory::Memory;
use super::pipeline::hazards::{need_stall_load_use, ForwardSelect};
use super::pipeline::latches::{IfIdEntry, MemWbEntry};
use super::pipeline::stages::{decode, execute, fetch, memory, writeback};
use super::pipeline::{dual_issue, Lane};
use super::units::cache::Cache;

/// What `step` observed this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Halted,
}

/// Floor for the simulated address space, independent of the loaded
/// image's length: scratch data (a stack, a heap) lives past the last
/// instruction word, and a too-small image would fault on the first
/// access to it.
const MIN_MEM_BYTES: usize = 0x1_0000;

/// Extra instruction slots appended past the image (or `MIN_MEM_BYTES`,
/// whichever governs) so fetch can keep running while the pipeline
/// drains. `ecall` is only observed once it reaches `MEM/WB.out`, four
/// cycles after it is fetched; dual-issue can fetch two words a cycle
/// across those four drain cycles, so eight words is the worst case.
/// Padding with [`isa::opcodes::NOP_WORD`] rather than zero bytes matters:
/// `NOP_WORD` is itself a valid `addi x0, x0, 0` encoding, so these
/// fetches decode and retire as ordinary (harmless) instructions instead
/// of tripping `InvalidInstruction` the way a bare zero word would.
const DRAIN_PAD_WORDS: usize = 8;

/// Builds the byte image `Cpu::new` actually runs against: `image`
/// followed by `NOP_WORD`-filled padding out to at least
/// `MIN_MEM_BYTES` plus `DRAIN_PAD_WORDS` words of slack.
fn padded_image(image: &[u8]) -> Vec<u8> {
    let mut bytes = image.to_vec();
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
    let target_len = bytes.len().max(MIN_MEM_BYTES) + DRAIN_PAD_WORDS * 4;
    let nop_bytes = isa::opcodes::NOP_WORD.to_le_bytes();
    while bytes.len() < target_len {
        bytes.extend_from_slice(&nop_bytes);
    }
    bytes
}

/// A snapshot of architectural state, for register dumps and the
/// fatal-error report.
#[derive(Clone, Copy, Debug)]
pub struct RegisterDump {
    pub pc: u32,
    pub regs: [u32; 32],
}

/// The five-stage pipeline, its data cache, and the architectural state
/// they operate on.
pub struct Cpu {
    pc: u32,
    lane0: Lane,
    lane1: Option<Lane>,
    regs: RegisterFile,
    memory: Memory,
    cache: Cache,
    config: Config,
    stats: SimStats,
    halted: bool,
}

impl Cpu {
    /// Builds a CPU with `image` loaded as data/instruction memory and
    /// fetch starting at `entry_pc`. `config.pipeline_width == 2` enables
    /// the dual-fetch extension.
    #[must_use]
    pub fn new(image: &[u8], entry_pc: u32, config: Config) -> Self {
        let lane1 = if config.pipeline_width >= 2 {
            Some(Lane::new())
        } else {
            None
        };
        Self {
            pc: entry_pc,
            lane0: Lane::new(),
            lane1,
            regs: RegisterFile::new(),
            memory: Memory::new(padded_image(image)),
            cache: Cache::new(&config.cache),
            stats: SimStats::default(),
            config,
            halted: false,
        }
    }

    /// Runs one clock tick. A no-op once halted, per the idempotence
    /// invariant in §8.
    pub fn step(&mut self) -> Result<StepOutcome, SimError> {
        if self.halted {
            return Ok(StepOutcome::Halted);
        }

        // 1. Fetch. Single-issue fetches only lane0; dual-issue also
        // fetches the next word for a tentative lane1 and decides
        // co-issue eligibility from both raw words before either lane's
        // decode stage runs.
        fetch::fetch_stage(&mut self.lane0, self.pc, &self.memory)?;
        let mut lane1_active = false;
        if let Some(lane1) = self.lane1.as_mut() {
            fetch::fetch_stage(lane1, self.pc.wrapping_add(4), &self.memory)?;
            // `eligible_pair` only rules out a *same-cycle* conflict
            // between the two slots; it has no bypass for lane1 reading
            // a value lane0 produced a prior cycle; that cross-lane
            // forwarding path does not exist (each lane's hazard/
            // forwarding unit only sees its own latches). Acceptable for
            // the optional extension (gated off by default, §9 OQ4 calls
            // the dual-issue bypass matrix incomplete), but a real
            // cross-lane RAW hazard here silently reads a stale register.
            lane1_active = match (
                isa::decode(self.lane0.if_id.inp.word),
                isa::decode(lane1.if_id.inp.word),
            ) {
                (Some(i0), Some(i1)) => dual_issue::eligible_pair(&i0, &i1),
                _ => false,
            };
            if !lane1_active {
                // Squash to a bubble this cycle; its word is simply
                // fetched again next cycle as lane0's slot.
                lane1.if_id.inp = IfIdEntry::default();
            }
        }

        // 2. Hazard detection, reading last cycle's committed `.out`.
        // Two lanes stall together: co-issue eligibility already rules
        // out any pair with a cross-lane dependency, so the only loads
        // that can trigger this are within a single lane.
        let stall = need_stall_load_use(&self.lane0.id_ex.out, self.lane0.if_id.out.word)
            || self.lane1.as_ref().is_some_and(|lane1| {
                need_stall_load_use(&lane1.id_ex.out, lane1.if_id.out.word)
            });

        // 3. Stall handling: hold IF/ID, the PC simply does not advance
        // this cycle.
        if stall {
            self.lane0.hold_fetch();
            if let Some(lane1) = self.lane1.as_mut() {
                lane1.hold_fetch();
            }
            self.stats.stalls += 1;
        }

        // 4. Decode (bubble on stall).
        decode::decode_stage(&mut self.lane0, &self.regs, stall)?;
        if let Some(lane1) = self.lane1.as_mut() {
            if lane1_active {
                decode::decode_stage(lane1, &self.regs, stall)?;
            } else {
                lane1.id_ex.inp = Default::default();
            }
        }

        // 5-6. Forwarding + execute.
        let (fwd_a0, fwd_b0) = execute::execute_stage(&mut self.lane0);
        count_forwards(&mut self.stats, fwd_a0, fwd_b0);
        if let Some(lane1) = self.lane1.as_mut() {
            let (fwd_a1, fwd_b1) = execute::execute_stage(lane1);
            count_forwards(&mut self.stats, fwd_a1, fwd_b1);
        }

        // 7. Memory.
        let (outcome0, latency0) =
            memory::memory_stage(&mut self.lane0, &mut self.memory, &mut self.cache, &self.config)?;
        let mut extra_cycles = latency0.extra_cycles;
        if let Some(trace) = latency0.cache_trace {
            println!("{trace}");
        }
        if let Some(lane1) = self.lane1.as_mut() {
            let (_, latency1) = memory::memory_stage(lane1, &mut self.memory, &mut self.cache, &self.config)?;
            extra_cycles += latency1.extra_cycles;
            if let Some(trace) = latency1.cache_trace {
                println!("{trace}");
            }
        }
        self.stats.hits = self.cache.hit_count;
        self.stats.misses = self.cache.miss_count;
        self.stats.evictions = self.cache.eviction_count;

        // 8. Writeback.
        let wb0 = writeback::writeback_stage(&mut self.lane0, &mut self.regs);
        record_retirement(&mut self.stats, &self.lane0.mem_wb.out);
        let mut halted = wb0.halted;
        if let Some(lane1) = self.lane1.as_mut() {
            let wb1 = writeback::writeback_stage(lane1, &mut self.regs);
            record_retirement(&mut self.stats, &lane1.mem_wb.out);
            halted = halted || wb1.halted;
        }

        // Trace: the stable per-stage `DEBUG_CYCLE` line format of §6,
        // emitted once all five stage functions have run and before
        // anything is flushed or committed, so every stage's line shows
        // the instruction it actually just processed this cycle.
        if self.config.trace.debug_cycle {
            emit_cycle_trace(&self.lane0);
            if let Some(lane1) = self.lane1.as_ref() {
                emit_cycle_trace(lane1);
            }
        }

        // 9. Flush. Co-issue eligibility restricts slot0 to non-branch
        // classes, so a taken branch/jump can only ever come from lane0.
        if outcome0.taken {
            self.lane0.flush_inp();
            if let Some(lane1) = self.lane1.as_mut() {
                lane1.flush_inp();
            }
            self.stats.flushes += 1;
        }

        // 10. Commit.
        self.lane0.commit();
        if let Some(lane1) = self.lane1.as_mut() {
            lane1.commit();
        }

        // 11. Advance PC, bump the cycle counter, check halt.
        let advance = if lane1_active { 8 } else { 4 };
        if lane1_active {
            self.stats.dual_issued += 1;
        }
        self.pc = if outcome0.taken {
            outcome0.target
        } else if stall {
            self.pc
        } else {
            self.pc.wrapping_add(advance)
        };
        self.stats.cycles += 1 + u64::from(extra_cycles);

        if halted {
            self.halted = true;
            return Ok(StepOutcome::Halted);
        }
        Ok(StepOutcome::Continue)
    }

    /// Steps until halted or a fatal error.
    pub fn run_until_halt(&mut self) -> Result<(), SimError> {
        loop {
            if self.step()? == StepOutcome::Halted {
                return Ok(());
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    #[must_use]
    pub fn dump_state(&self) -> RegisterDump {
        RegisterDump {
            pc: self.pc,
            regs: self.regs.dump(),
        }
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

/// Prints the five `[IF|ID|EX|MEM|WB]: Instruction [...]@[...]: <mnemonic>`
/// lines for one lane's current snapshot. `IF` reads `.inp` (this cycle's
/// fetch, not yet committed); every other stage reads `.out` (what it was
/// handed to process this cycle).
fn emit_cycle_trace(lane: &Lane) {
    trace_line("IF ", lane.if_id.inp.word, lane.if_id.inp.pc);
    trace_line("ID ", lane.if_id.out.word, lane.if_id.out.pc);
    trace_line("EX ", lane.id_ex.out.word, lane.id_ex.out.pc);
    trace_line("MEM", lane.ex_mem.out.word, lane.ex_mem.out.pc);
    trace_line("WB ", lane.mem_wb.out.word, lane.mem_wb.out.pc);
}

fn trace_line(stage: &str, word: u32, pc: u32) {
    println!(
        "[{stage}]: Instruction [{word:08x}]@[{pc:08x}]: {}",
        isa::disassemble(word)
    );
}

fn count_forwards(stats: &mut SimStats, a: ForwardSelect, b: ForwardSelect) {
    for select in [a, b] {
        match select {
            ForwardSelect::ExMem => stats.fwd_ex_ex += 1,
            ForwardSelect::MemWb => stats.fwd_ex_mem += 1,
            ForwardSelect::None => {}
        }
    }
}

fn record_retirement(stats: &mut SimStats, entry: &MemWbEntry) {
    if entry.word == crate::isa::opcodes::NOP_WORD {
        return;
    }
    stats.instructions_retired += 1;
    match isa::decode(entry.word) {
        Some(isa::Instruction::RType { .. } | isa::Instruction::IType { .. } | isa::Instruction::Lui { .. }) => {
            stats.inst_alu += 1;
        }
        Some(isa::Instruction::Load { .. }) => stats.inst_load += 1,
        Some(isa::Instruction::Store { .. }) => stats.inst_store += 1,
        Some(isa::Instruction::Branch { .. } | isa::Instruction::Jal { .. }) => stats.inst_branch += 1,
        Some(isa::Instruction::System { .. }) | None => stats.inst_system += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
        opcode | (rd << 7) | (funct3 << 12) | (rs1 << 15) | (rs2 << 20) | (funct7 << 25)
    }

    fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
        0x13 | (rd << 7) | (rs1 << 15) | ((imm as u32 & 0xFFF) << 20)
    }

    fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
        word(0x33, rd, 0, rs1, rs2, 0)
    }

    const ECALL: u32 = 0x0000_0073;

    fn assemble(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn add_then_use_forwards_both_operands_from_ex_mem() {
        // addi x1,x0,5; addi x2,x0,7; add x3,x1,x2; addi x10,x0,10; ecall
        let image = assemble(&[
            addi(1, 0, 5),
            addi(2, 0, 7),
            add(3, 1, 2),
            addi(10, 0, 10),
            ECALL,
        ]);
        let mut cpu = Cpu::new(&image, 0, Config::default());
        cpu.run_until_halt().unwrap();
        assert_eq!(cpu.dump_state().regs[3], 12);
        assert_eq!(cpu.stats().fwd_ex_ex, 2);
        assert_eq!(cpu.stats().stalls, 0);
    }

    #[test]
    fn load_use_stalls_exactly_once() {
        // addi x1,x0,0x100; sw x0,0(x1); lw x2,0(x1); add x3,x2,x2; addi x10,x0,10; ecall
        let sw = word(0x23, 0, 2, 1, 0, 0); // sw x0, 0(x1): imm fields all zero
        let lw = word(0x03, 2, 2, 1, 0, 0); // lw x2, 0(x1)
        let image = assemble(&[
            addi(1, 0, 0x100),
            sw,
            lw,
            add(3, 2, 2),
            addi(10, 0, 10),
            ECALL,
        ]);
        let mut cpu = Cpu::new(&image, 0, Config::default());
        cpu.run_until_halt().unwrap();
        assert_eq!(cpu.dump_state().regs[3], 0);
        assert_eq!(cpu.stats().stalls, 1);
        assert!(cpu.stats().fwd_ex_mem >= 1);
    }

    #[test]
    fn taken_branch_flushes_the_wrong_path_instruction() {
        // addi x1,x0,1; beq x1,x1,+8; addi x2,x0,42; addi x2,x0,99; addi x10,x0,10; ecall
        let beq = {
            let imm = 8i32;
            let imm12 = ((imm >> 12) & 0x1) as u32;
            let imm11 = ((imm >> 11) & 0x1) as u32;
            let imm10_5 = ((imm >> 5) & 0x3F) as u32;
            let imm4_1 = ((imm >> 1) & 0xF) as u32;
            0x63 | (imm11 << 7) | (imm4_1 << 8) | (0 << 12) | (1 << 15) | (1 << 20) | (imm10_5 << 25) | (imm12 << 31)
        };
        let image = assemble(&[
            addi(1, 0, 1),
            beq,
            addi(2, 0, 42),
            addi(2, 0, 99),
            addi(10, 0, 10),
            ECALL,
        ]);
        let mut cpu = Cpu::new(&image, 0, Config::default());
        cpu.run_until_halt().unwrap();
        assert_eq!(cpu.dump_state().regs[2], 99);
        assert_eq!(cpu.stats().flushes, 1);
    }

    #[test]
    fn halt_trap_stops_the_simulator() {
        let image = assemble(&[addi(10, 0, 10), ECALL]);
        let mut cpu = Cpu::new(&image, 0, Config::default());
        cpu.run_until_halt().unwrap();
        assert!(cpu.is_halted());
        assert_eq!(cpu.step().unwrap(), StepOutcome::Halted);
    }

    #[test]
    fn invalid_opcode_is_fatal() {
        let image = assemble(&[0x7F, 0, 0, 0]);
        let mut cpu = Cpu::new(&image, 0, Config::default());
        let err = cpu.run_until_halt().unwrap_err();
        assert!(matches!(err, SimError::InvalidInstruction { .. }));
    }
}
