//! Co-issue eligibility for the optional dual-fetch front end (component
//! K). The source permits only an ALU-or-immediate instruction in slot 0
//! paired with a load-or-store in slot 1, and squashes slot 1 on any
//! conflict; the bypass matrix between the two slots was left
//! unspecified (open question 4), so this module fixes it explicitly:
//!
//! - Slot 0 must be `RType`, `IType`, or `Lui` — never a branch, jump,
//!   load, store, or system instruction. A branch/jump in slot 0 would
//!   make slot 1's fetch speculative past an unresolved control
//!   transfer; a load/store in slot 0 would need the very forwarding
//!   path this scheme exists to avoid building.
//! - Slot 1 must be `Load` or `Store`.
//! - Slot 1 must not read (`rs1`/`rs2`) or write (`rd`) the register
//!   slot 0 writes — any such pair is a same-cycle RAW/WAW hazard with
//!   no forwarding path between lanes, so it is squashed rather than
//!   resolved.
//!
//! A pair that fails eligibility is never "stalled": slot 1 is squashed
//! to a bubble this cycle and its own word is simply fetched again next
//! cycle, now as slot 0.

use crate::isa::Instruction;

/// `true` if `slot0` (older, program order) and `slot1` (younger) may
/// be issued together this cycle.
#[must_use]
pub fn eligible_pair(slot0: &Instruction, slot1: &Instruction) -> bool {
    if !is_alu_or_imm(slot0) {
        return false;
    }
    if !is_load_or_store(slot1) {
        return false;
    }
    let slot0_rd = slot0.rd();
    if slot0_rd == 0 {
        return true;
    }
    slot0_rd != slot1.rs1() && slot0_rd != slot1.rs2() && slot0_rd != slot1.rd()
}

fn is_alu_or_imm(inst: &Instruction) -> bool {
    matches!(
        inst,
        Instruction::RType { .. } | Instruction::IType { .. } | Instruction::Lui { .. }
    )
}

fn is_load_or_store(inst: &Instruction) -> bool {
    matches!(inst, Instruction::Load { .. } | Instruction::Store { .. })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alu_then_independent_load_is_eligible() {
        let slot0 = Instruction::IType {
            rd: 1,
            funct3: 0,
            rs1: 0,
            funct7: 0,
            imm: 5,
        };
        let slot1 = Instruction::Load {
            rd: 2,
            funct3: 0,
            rs1: 3,
            imm: 0,
        };
        assert!(eligible_pair(&slot0, &slot1));
    }

    #[test]
    fn load_address_depending_on_slot0_result_is_ineligible() {
        let slot0 = Instruction::IType {
            rd: 1,
            funct3: 0,
            rs1: 0,
            funct7: 0,
            imm: 5,
        };
        let slot1 = Instruction::Load {
            rd: 2,
            funct3: 0,
            rs1: 1,
            imm: 0,
        };
        assert!(!eligible_pair(&slot0, &slot1));
    }

    #[test]
    fn two_alu_ops_are_ineligible() {
        let slot0 = Instruction::IType {
            rd: 1,
            funct3: 0,
            rs1: 0,
            funct7: 0,
            imm: 5,
        };
        let slot1 = Instruction::IType {
            rd: 2,
            funct3: 0,
            rs1: 0,
            funct7: 0,
            imm: 6,
        };
        assert!(!eligible_pair(&slot0, &slot1));
    }

    #[test]
    fn branch_in_slot0_is_ineligible() {
        let slot0 = Instruction::Branch {
            funct3: 0,
            rs1: 1,
            rs2: 2,
            imm: 8,
        };
        let slot1 = Instruction::Load {
            rd: 2,
            funct3: 0,
            rs1: 3,
            imm: 0,
        };
        assert!(!eligible_pair(&slot0, &slot1));
    }
}
