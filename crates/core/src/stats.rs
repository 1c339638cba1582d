//! Simulation statistics collection and reporting.
//!
//! Tracks the counters §6 requires (`stats()`'s `{cycles, stalls,
//! flushes, fwd_ex_ex, fwd_ex_mem, hits, misses, evictions}`) plus the
//! instruction-mix breakdown a complete report wants: none of these are
//! architectural state, so nothing here affects `step`'s results.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed, including cache-latency cycles.
    pub cycles: u64,
    /// Number of instructions committed (retired) at writeback.
    pub instructions_retired: u64,

    /// Count of ALU (R-type/I-type/lui) instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of system (ecall) instructions retired.
    pub inst_system: u64,

    /// Load-use stalls inserted by the hazard unit.
    pub stalls: u64,
    /// Taken-branch flushes (3 latches squashed per event).
    pub flushes: u64,
    /// Operands resolved via the EX/MEM bypass.
    pub fwd_ex_ex: u64,
    /// Operands resolved via the MEM/WB bypass.
    pub fwd_ex_mem: u64,

    /// Data cache hits.
    pub hits: u64,
    /// Data cache misses (including those that evict).
    pub misses: u64,
    /// Data cache evictions.
    pub evictions: u64,

    /// Cycles in which a second instruction co-issued with the first.
    pub dual_issued: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
            stalls: 0,
            flushes: 0,
            fwd_ex_ex: 0,
            fwd_ex_mem: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
            dual_issued: 0,
        }
    }
}

/// Section names for selective stats output.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "memory"];

impl SimStats {
    /// Prints only the requested statistics sections to stdout. Pass an
    /// empty slice to print all sections (same as [`SimStats::print`]).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        if want("summary") {
            let ipc = self.instructions_retired as f64 / cyc as f64;
            let cpi = cyc as f64 / instr as f64;
            println!("==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {ipc:.4}");
            println!("sim_cpi                  {cpi:.4}");
            println!("host_seconds             {seconds:.4} s");
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            println!(
                "  stalls.load_use        {} ({:.2}%)",
                self.stalls,
                (self.stalls as f64 / cyc as f64) * 100.0
            );
            println!(
                "  flushes.control        {} ({:.2}%)",
                self.flushes,
                (self.flushes as f64 / cyc as f64) * 100.0
            );
            println!("  forwards.ex_mem        {}", self.fwd_ex_ex);
            println!("  forwards.mem_wb        {}", self.fwd_ex_mem);
            println!("  dual_issued_cycles     {}", self.dual_issued);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let total = instr as f64;
            println!("INSTRUCTION MIX");
            println!(
                "  op.alu                 {} ({:.2}%)",
                self.inst_alu,
                (self.inst_alu as f64 / total) * 100.0
            );
            println!(
                "  op.load                {} ({:.2}%)",
                self.inst_load,
                (self.inst_load as f64 / total) * 100.0
            );
            println!(
                "  op.store               {} ({:.2}%)",
                self.inst_store,
                (self.inst_store as f64 / total) * 100.0
            );
            println!(
                "  op.branch              {} ({:.2}%)",
                self.inst_branch,
                (self.inst_branch as f64 / total) * 100.0
            );
            println!(
                "  op.system              {} ({:.2}%)",
                self.inst_system,
                (self.inst_system as f64 / total) * 100.0
            );
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            let total = self.hits + self.misses;
            let miss_rate = if total > 0 {
                100.0 * (self.misses as f64 / total as f64)
            } else {
                0.0
            };
            println!("DATA CACHE");
            println!("  accesses               {total}");
            println!("  hits                   {}", self.hits);
            println!("  misses                 {}", self.misses);
            println!("  evictions              {}", self.evictions);
            println!("  miss_rate              {miss_rate:.2}%");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
