//! Decode: parse the fetched word once, read its operands out of the
//! register file, and build the control bundle the rest of the pipeline
//! drives off of. This is §4.2's opcode table, reimplemented as a match
//! over the decoded [`Instruction`] rather than the raw opcode, since
//! the decoder has already done the bitfield work.

use crate::common::error::SimError;
use crate::common::reg::RegisterFile;
use crate::core::pipeline::lane::Lane;
use crate::core::pipeline::latches::IdExEntry;
use crate::core::pipeline::signals::{AluClass, AluSrcB, ControlSignals};
use crate::isa::{self, Instruction};

/// Runs decode for one lane. `bubble` is asserted by the load-use
/// hazard detector: when set, no parsing happens and ID/EX.in becomes
/// the all-zero control bundle, per §4.6's `ControlMUXHZD`.
pub fn decode_stage(lane: &mut Lane, regs: &RegisterFile, bubble: bool) -> Result<(), SimError> {
    if bubble {
        lane.id_ex.inp = IdExEntry::default();
        return Ok(());
    }

    let entry = lane.if_id.out;
    let inst = isa::decode(entry.word).ok_or(SimError::InvalidInstruction {
        pc: entry.pc,
        word: entry.word,
    })?;

    let ctrl = gen_control(&inst);
    lane.id_ex.inp = IdExEntry {
        pc: entry.pc,
        word: entry.word,
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        rd: inst.rd(),
        imm: imm_of(&inst),
        rs1_val: regs.read(inst.rs1()),
        rs2_val: regs.read(inst.rs2()),
        ctrl,
    };
    Ok(())
}

/// The opcode → control bundle table from §4.2, keyed on the decoded
/// variant instead of the raw opcode bits.
fn gen_control(inst: &Instruction) -> ControlSignals {
    let (funct3, funct7) = funct_of(inst);
    match inst {
        Instruction::RType { .. } => ControlSignals {
            alu_class: AluClass::RType,
            alu_src_b: AluSrcB::Reg,
            reg_write: true,
            funct3,
            funct7,
            ..ControlSignals::bubble()
        },
        Instruction::IType { .. } => ControlSignals {
            alu_class: AluClass::IType,
            alu_src_b: AluSrcB::Imm,
            reg_write: true,
            funct3,
            funct7,
            ..ControlSignals::bubble()
        },
        Instruction::Load { .. } => ControlSignals {
            alu_class: AluClass::Load,
            alu_src_b: AluSrcB::Imm,
            mem_read: true,
            mem_to_reg: true,
            reg_write: true,
            funct3,
            ..ControlSignals::bubble()
        },
        Instruction::Store { .. } => ControlSignals {
            alu_class: AluClass::Load,
            alu_src_b: AluSrcB::Imm,
            mem_write: true,
            funct3,
            ..ControlSignals::bubble()
        },
        Instruction::Lui { .. } => ControlSignals {
            alu_class: AluClass::Lui,
            alu_src_b: AluSrcB::Imm,
            reg_write: true,
            ..ControlSignals::bubble()
        },
        Instruction::Jal { .. } => ControlSignals {
            alu_class: AluClass::Jal,
            alu_src_b: AluSrcB::Reg,
            branch: true,
            reg_write: true,
            ..ControlSignals::bubble()
        },
        Instruction::Branch { .. } => ControlSignals {
            alu_class: AluClass::Branch,
            alu_src_b: AluSrcB::Reg,
            branch: true,
            funct3,
            ..ControlSignals::bubble()
        },
        // ecall: decodes, carries no control effect beyond the halt-trap
        // check writeback performs on the raw word.
        Instruction::System { .. } => ControlSignals::bubble(),
    }
}

/// The immediate each format carries, or 0 for R-type and system, which
/// have none.
fn imm_of(inst: &Instruction) -> i32 {
    match *inst {
        Instruction::IType { imm, .. }
        | Instruction::Load { imm, .. }
        | Instruction::Store { imm, .. }
        | Instruction::Branch { imm, .. }
        | Instruction::Lui { imm, .. }
        | Instruction::Jal { imm, .. } => imm,
        Instruction::RType { .. } | Instruction::System { .. } => 0,
    }
}

/// `(funct3, funct7)`, or 0 where a format has no such field.
fn funct_of(inst: &Instruction) -> (u32, u32) {
    match *inst {
        Instruction::RType { funct3, funct7, .. } => (funct3, funct7),
        Instruction::IType { funct3, funct7, .. } => (funct3, funct7),
        Instruction::Load { funct3, .. } | Instruction::Branch { funct3, .. } => (funct3, 0),
        Instruction::Store { .. }
        | Instruction::Lui { .. }
        | Instruction::Jal { .. }
        | Instruction::System { .. } => (0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sets_mem_read_and_mem_to_reg() {
        let inst = Instruction::Load {
            rd: 1,
            funct3: 0,
            rs1: 2,
            imm: 4,
        };
        let ctrl = gen_control(&inst);
        assert!(ctrl.mem_read);
        assert!(ctrl.mem_to_reg);
        assert!(!ctrl.mem_write);
    }

    #[test]
    fn store_writes_memory_but_not_registers() {
        let inst = Instruction::Store {
            funct3: 2,
            rs1: 1,
            rs2: 2,
            imm: 0,
        };
        let ctrl = gen_control(&inst);
        assert!(ctrl.mem_write);
        assert!(!ctrl.reg_write);
    }

    #[test]
    fn branch_and_jal_both_assert_branch() {
        let beq = Instruction::Branch {
            funct3: 0,
            rs1: 1,
            rs2: 2,
            imm: 8,
        };
        let jal = Instruction::Jal { rd: 1, imm: 8 };
        assert!(gen_control(&beq).branch);
        assert!(gen_control(&jal).branch);
    }
}
