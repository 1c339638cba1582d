//! A lane is one instruction's path through IF/ID/EX/MEM/WB: its own four
//! latches. Single-issue configurations run exactly one lane; the
//! dual-fetch extension (component K) runs a second lane alongside it.
//!
//! Co-issue eligibility is decided once, at fetch, by
//! [`super::dual_issue`]: an ineligible second slot is squashed to a
//! bubble before it ever enters a lane, so the two lanes never need to
//! forward values to each other — each lane's hazard and forwarding
//! logic is exactly the single-issue logic, run twice.

use super::latches::{ExMemEntry, IdExEntry, IfIdEntry, Latch, MemWbEntry};

#[derive(Default)]
pub struct Lane {
    pub if_id: Latch<IfIdEntry>,
    pub id_ex: Latch<IdExEntry>,
    pub ex_mem: Latch<ExMemEntry>,
    pub mem_wb: Latch<MemWbEntry>,
}

impl Lane {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self) {
        self.if_id.commit();
        self.id_ex.commit();
        self.ex_mem.commit();
        self.mem_wb.commit();
    }

    /// Overwrites all four `.inp` sides with bubbles — used by the
    /// control-hazard flush.
    pub fn flush_inp(&mut self) {
        self.if_id.inp = IfIdEntry::default();
        self.id_ex.inp = IdExEntry::default();
        self.ex_mem.inp = ExMemEntry::default();
    }

    /// Holds `IfId.inp` at its committed value — used by the load-use
    /// stall.
    pub fn hold_fetch(&mut self) {
        self.if_id.inp = self.if_id.out;
    }
}
