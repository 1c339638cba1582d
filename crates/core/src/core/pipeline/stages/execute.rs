//! Execute: apply forwarding, run the ALU, and resolve the branch
//! condition and target. Per §4.6, forwarding is computed from this
//! lane's own EX/MEM and MEM/WB latches — co-issued lanes never
//! forward to each other, so this function is self-contained.

use crate::core::pipeline::hazards::{compute_forwards, ForwardSelect};
use crate::core::pipeline::lane::Lane;
use crate::core::pipeline::latches::ExMemEntry;
use crate::core::pipeline::signals::AluClass;
use crate::core::units::alu::{execute as alu_execute, gen_alu_control};
use crate::isa::opcodes::funct3;

/// Runs execute for one lane. Returns the forwarding selects applied
/// this cycle, for the driver's forwarding-event statistics.
pub fn execute_stage(lane: &mut Lane) -> (ForwardSelect, ForwardSelect) {
    let id_ex = lane.id_ex.out;
    let (fwd_a, fwd_b) = compute_forwards(&id_ex, &lane.ex_mem.out, &lane.mem_wb.out);

    let forwarded_rs1 = resolve(fwd_a, id_ex.rs1_val, &lane.ex_mem.out, &lane.mem_wb.out);
    let forwarded_rs2 = resolve(fwd_b, id_ex.rs2_val, &lane.ex_mem.out, &lane.mem_wb.out);

    // jal has no real rs1; the C source wires the link-address adder's
    // first operand straight to the instruction's own PC instead.
    let operand_a = if id_ex.ctrl.alu_class == AluClass::Jal {
        id_ex.pc
    } else {
        forwarded_rs1
    };
    let operand_b = match id_ex.ctrl.alu_src_b {
        crate::core::pipeline::signals::AluSrcB::Imm => id_ex.imm as u32,
        crate::core::pipeline::signals::AluSrcB::Reg => forwarded_rs2,
    };

    let op = gen_alu_control(id_ex.ctrl.alu_class, id_ex.ctrl.funct3, id_ex.ctrl.funct7);
    let alu_result = alu_execute(op, operand_a, operand_b);

    let taken = if !id_ex.ctrl.branch {
        false
    } else if id_ex.ctrl.alu_class == AluClass::Jal {
        true
    } else {
        match id_ex.ctrl.funct3 {
            funct3::BEQ => alu_result == 0,
            funct3::BNE => alu_result != 0,
            _ => false,
        }
    };
    let branch_target = id_ex.pc.wrapping_add(id_ex.imm as u32);

    lane.ex_mem.inp = ExMemEntry {
        pc: id_ex.pc,
        word: id_ex.word,
        rd: id_ex.rd,
        alu_result,
        // Stores always use the forwarded rs2 value, never the
        // immediate, regardless of what the ALU's operand B mux picked.
        store_data: forwarded_rs2,
        taken,
        branch_target,
        ctrl: id_ex.ctrl,
    };

    (fwd_a, fwd_b)
}

fn resolve(
    select: ForwardSelect,
    decoded: u32,
    ex_mem_out: &ExMemEntry,
    mem_wb_out: &crate::core::pipeline::latches::MemWbEntry,
) -> u32 {
    match select {
        ForwardSelect::None => decoded,
        ForwardSelect::ExMem => ex_mem_out.alu_result,
        ForwardSelect::MemWb => mem_wb_out.write_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::latches::IdExEntry;
    use crate::core::pipeline::signals::{AluSrcB, ControlSignals};

    #[test]
    fn jal_operand_a_is_pc_not_rs1() {
        let mut lane = Lane::new();
        lane.id_ex.out = IdExEntry {
            pc: 0x100,
            rs1_val: 0xDEAD,
            imm: 4,
            ctrl: ControlSignals {
                alu_class: AluClass::Jal,
                alu_src_b: AluSrcB::Reg,
                branch: true,
                reg_write: true,
                ..ControlSignals::bubble()
            },
            ..Default::default()
        };
        execute_stage(&mut lane);
        assert_eq!(lane.ex_mem.inp.alu_result, 0x104);
        assert!(lane.ex_mem.inp.taken);
        assert_eq!(lane.ex_mem.inp.branch_target, 0x104);
    }

    #[test]
    fn beq_taken_when_operands_equal() {
        let mut lane = Lane::new();
        lane.id_ex.out = IdExEntry {
            pc: 0x200,
            rs1_val: 5,
            rs2_val: 5,
            imm: 8,
            ctrl: ControlSignals {
                alu_class: AluClass::Branch,
                alu_src_b: AluSrcB::Reg,
                branch: true,
                funct3: funct3::BEQ,
                ..ControlSignals::bubble()
            },
            ..Default::default()
        };
        execute_stage(&mut lane);
        assert!(lane.ex_mem.inp.taken);
        assert_eq!(lane.ex_mem.inp.branch_target, 0x208);
    }
}
