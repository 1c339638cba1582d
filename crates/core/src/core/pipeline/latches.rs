//! The four stage-boundary latches, each an `in`/`out` pair committed
//! atomically at the end of every tick. This is the sole concurrency
//! primitive of the whole simulator (see the design notes): all reads
//! within a tick observe `.out`; all writes target `.in`; `commit` swaps
//! them.

use crate::isa::opcodes::NOP_WORD;

use super::signals::ControlSignals;

/// A pipeline register: the value written this cycle (`inp`) and the
/// value visible to consumers this cycle (`out`).
#[derive(Clone, Debug, Default)]
pub struct Latch<T> {
    pub inp: T,
    pub out: T,
}

impl<T: Clone> Latch<T> {
    /// `out <- in`, run once per tick after every stage has written.
    pub fn commit(&mut self) {
        self.out = self.inp.clone();
    }
}

/// IF/ID: the fetched word and its PC. Decode reconstructs everything
/// else from `word`.
#[derive(Clone, Copy, Debug)]
pub struct IfIdEntry {
    pub pc: u32,
    pub word: u32,
}

impl Default for IfIdEntry {
    fn default() -> Self {
        Self {
            pc: 0,
            word: NOP_WORD,
        }
    }
}

/// ID/EX: decoded operands, the control bundle, and the raw word (kept
/// for tracing and the halt-trap check).
#[derive(Clone, Copy, Debug)]
pub struct IdExEntry {
    pub pc: u32,
    pub word: u32,
    pub rs1: usize,
    pub rs2: usize,
    pub rd: usize,
    pub imm: i32,
    pub rs1_val: u32,
    pub rs2_val: u32,
    pub ctrl: ControlSignals,
}

impl Default for IdExEntry {
    fn default() -> Self {
        Self {
            pc: 0,
            word: NOP_WORD,
            rs1: 0,
            rs2: 0,
            rd: 0,
            imm: 0,
            rs1_val: 0,
            rs2_val: 0,
            ctrl: ControlSignals::bubble(),
        }
    }
}

/// EX/MEM: the ALU result, the (possibly forwarded) store data, and the
/// branch outcome computed this cycle.
#[derive(Clone, Copy, Debug)]
pub struct ExMemEntry {
    pub pc: u32,
    pub word: u32,
    pub rd: usize,
    pub alu_result: u32,
    pub store_data: u32,
    pub taken: bool,
    pub branch_target: u32,
    pub ctrl: ControlSignals,
}

impl Default for ExMemEntry {
    fn default() -> Self {
        Self {
            pc: 0,
            word: NOP_WORD,
            rd: 0,
            alu_result: 0,
            store_data: 0,
            taken: false,
            branch_target: 0,
            ctrl: ControlSignals::bubble(),
        }
    }
}

/// MEM/WB: the value writeback commits, whichever of `alu_result` or
/// `mem_data` the control bundle selects.
#[derive(Clone, Copy, Debug)]
pub struct MemWbEntry {
    pub pc: u32,
    pub word: u32,
    pub rd: usize,
    pub alu_result: u32,
    pub mem_data: u32,
    pub ctrl: ControlSignals,
}

impl Default for MemWbEntry {
    fn default() -> Self {
        Self {
            pc: 0,
            word: NOP_WORD,
            rd: 0,
            alu_result: 0,
            mem_data: 0,
            ctrl: ControlSignals::bubble(),
        }
    }
}

impl MemWbEntry {
    /// The value writeback actually commits to `rd`.
    #[must_use]
    pub fn write_value(&self) -> u32 {
        if self.ctrl.mem_to_reg {
            self.mem_data
        } else {
            self.alu_result
        }
    }
}
