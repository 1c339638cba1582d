//! The ALU control refiner and the ALU itself: two pure functions over
//! plain values, no pipeline state.

use crate::core::pipeline::signals::{AluClass, AluOp};

/// Refines the control bundle's [`AluClass`] with `funct3`/`funct7` (or,
/// for shift-immediates, the immediate's high bits standing in for
/// `funct7`) into the concrete operation the ALU executes.
#[must_use]
pub fn gen_alu_control(class: AluClass, funct3: u32, funct7: u32) -> AluOp {
    use crate::isa::opcodes::funct3 as f3;

    match class {
        AluClass::Load => AluOp::Add,
        AluClass::Branch => AluOp::Sub,
        AluClass::Lui => AluOp::Lui,
        AluClass::Jal => AluOp::JalLink,
        AluClass::RType => match (funct3, funct7) {
            (f3::ADD_SUB, crate::isa::opcodes::funct7::DEFAULT) => AluOp::Add,
            (f3::ADD_SUB, crate::isa::opcodes::funct7::SUB_SRA) => AluOp::Sub,
            (f3::ADD_SUB, crate::isa::opcodes::funct7::MUL_EXT) => AluOp::Mul,
            (f3::SLL, crate::isa::opcodes::funct7::DEFAULT) => AluOp::Sll,
            (f3::SLL, crate::isa::opcodes::funct7::MUL_EXT) => AluOp::Mulh,
            (f3::SLT, _) => AluOp::Slt,
            (f3::XOR, _) => AluOp::Xor,
            (f3::SRL_SRA, crate::isa::opcodes::funct7::DEFAULT) => AluOp::Srl,
            (f3::SRL_SRA, crate::isa::opcodes::funct7::SUB_SRA) => AluOp::Sra,
            (f3::OR, _) => AluOp::Or,
            (f3::AND, _) => AluOp::And,
            _ => AluOp::Unknown,
        },
        AluClass::IType => match funct3 {
            f3::ADD_SUB => AluOp::Add,
            f3::SLL => AluOp::Sll,
            f3::SLT => AluOp::Slt,
            f3::XOR => AluOp::Xor,
            f3::SRL_SRA => {
                if funct7 == crate::isa::opcodes::funct7::SUB_SRA {
                    AluOp::Sra
                } else {
                    AluOp::Srl
                }
            }
            f3::OR => AluOp::Or,
            f3::AND => AluOp::And,
            _ => AluOp::Unknown,
        },
    }
}

/// The sentinel the ALU returns for an unrecognized operation tag. Never
/// used for control flow; it exists so a bug in `gen_alu_control` shows
/// up loudly in a trace instead of silently computing `0`.
pub const UNKNOWN_RESULT: u32 = 0xBADC_AFFE;

/// Executes `op` over `a`, `b`. Pure: no access to pipeline or memory
/// state.
#[must_use]
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let shamt = b & 0x1F;
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a.wrapping_shl(shamt),
        AluOp::Srl => a.wrapping_shr(shamt),
        AluOp::Sra => ((a as i32) >> shamt) as u32,
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Xor => a ^ b,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Mul => a.wrapping_mul(b),
        // Unsigned x unsigned, matching the C source exactly rather than
        // the RISC-V manual's signed x signed — see the design notes.
        AluOp::Mulh => ((u64::from(a) * u64::from(b)) >> 32) as u32,
        // `b` already carries the immediate pre-shifted into bits
        // [31:12] by immediate reconstruction; `a` is ignored.
        AluOp::Lui => b,
        AluOp::JalLink => a.wrapping_add(4),
        AluOp::Unknown => UNKNOWN_RESULT,
    }
}
