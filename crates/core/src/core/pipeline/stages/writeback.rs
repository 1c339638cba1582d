//! Writeback: commit MEM/WB's result to the register file and detect
//! the halt trap. Reads `.out`, i.e. last cycle's memory output —
//! five-stage latency falls out of that one cycle of lag.

use crate::common::reg::RegisterFile;
use crate::core::pipeline::lane::Lane;
use crate::isa::opcodes::ECALL_WORD;

/// What writeback observed about the instruction it just retired.
#[derive(Clone, Copy, Debug, Default)]
pub struct WritebackOutcome {
    /// `false` for a bubble (`word == NOP_WORD`, inserted by bootstrap,
    /// a stall, or a flush) — these never count as retired instructions.
    pub retired: bool,
    pub halted: bool,
}

/// Runs writeback for one lane.
pub fn writeback_stage(lane: &mut Lane, regs: &mut RegisterFile) -> WritebackOutcome {
    let mem_wb = lane.mem_wb.out;
    if mem_wb.ctrl.reg_write && mem_wb.rd != 0 {
        regs.write(mem_wb.rd, mem_wb.write_value());
    }

    let halted = mem_wb.word == ECALL_WORD && regs.read(10) == 10;
    WritebackOutcome {
        retired: mem_wb.word != crate::isa::opcodes::NOP_WORD,
        halted,
    }
}
