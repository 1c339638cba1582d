//! Textual disassembly for the `DEBUG_CYCLE` trace line format of §6:
//! `[IF|ID|EX|MEM|WB]: Instruction [%08x]@[%08x]: <mnemonic>`. This is a
//! stable, specified wire format (not a diagnostic), so it lives in the
//! core crate alongside the decoder it disassembles, the same way the
//! cache's `Status::trace_line` lives next to the cache.

use super::instruction::Instruction;
use super::opcodes::{funct3, ECALL_WORD, NOP_WORD};
use super::decode;

/// Renders `word` as a short assembly mnemonic, or a hex fallback for an
/// opcode `decode` does not recognize.
#[must_use]
pub fn disassemble(word: u32) -> String {
    if word == NOP_WORD {
        return "nop".to_string();
    }
    if word == ECALL_WORD {
        return "ecall".to_string();
    }
    match decode(word) {
        Some(inst) => format_inst(&inst),
        None => format!("unknown({word:#010x})"),
    }
}

fn format_inst(inst: &Instruction) -> String {
    match *inst {
        Instruction::RType {
            rd,
            funct3: f3,
            rs1,
            rs2,
            funct7,
        } => format!("{} x{rd}, x{rs1}, x{rs2}", rtype_name(f3, funct7)),
        Instruction::IType {
            rd,
            funct3: f3,
            rs1,
            funct7,
            imm,
        } => {
            if matches!(f3, funct3::SLL | funct3::SRL_SRA) {
                format!("{} x{rd}, x{rs1}, {}", itype_shift_name(f3, funct7), imm & 0x1F)
            } else {
                format!("{} x{rd}, x{rs1}, {imm}", itype_name(f3))
            }
        }
        Instruction::Load {
            rd,
            funct3: f3,
            rs1,
            imm,
        } => format!("{} x{rd}, {imm}(x{rs1})", load_name(f3)),
        Instruction::Store {
            funct3: f3,
            rs1,
            rs2,
            imm,
        } => format!("{} x{rs2}, {imm}(x{rs1})", store_name(f3)),
        Instruction::Branch {
            funct3: f3,
            rs1,
            rs2,
            imm,
        } => format!("{} x{rs1}, x{rs2}, {imm}", branch_name(f3)),
        Instruction::Lui { rd, imm } => format!("lui x{rd}, {:#x}", (imm as u32) >> 12),
        Instruction::Jal { rd, imm } => format!("jal x{rd}, {imm}"),
        Instruction::System { rd, funct3: f3, rs1 } => {
            format!("system(unknown) x{rd}, x{rs1}, {f3}")
        }
    }
}

fn rtype_name(f3: u32, f7: u32) -> &'static str {
    use crate::isa::opcodes::funct7;
    match (f3, f7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => "add",
        (funct3::ADD_SUB, funct7::SUB_SRA) => "sub",
        (funct3::ADD_SUB, funct7::MUL_EXT) => "mul",
        (funct3::SLL, funct7::MUL_EXT) => "mulh",
        (funct3::SLL, _) => "sll",
        (funct3::SLT, _) => "slt",
        (funct3::SLTU, _) => "sltu",
        (funct3::XOR, _) => "xor",
        (funct3::SRL_SRA, funct7::SUB_SRA) => "sra",
        (funct3::SRL_SRA, _) => "srl",
        (funct3::OR, _) => "or",
        (funct3::AND, _) => "and",
        _ => "r?",
    }
}

fn itype_name(f3: u32) -> &'static str {
    match f3 {
        funct3::ADD_SUB => "addi",
        funct3::SLT => "slti",
        funct3::SLTU => "sltiu",
        funct3::XOR => "xori",
        funct3::OR => "ori",
        funct3::AND => "andi",
        _ => "i?",
    }
}

fn itype_shift_name(f3: u32, f7: u32) -> &'static str {
    use crate::isa::opcodes::funct7;
    match (f3, f7) {
        (funct3::SLL, _) => "slli",
        (funct3::SRL_SRA, funct7::SUB_SRA) => "srai",
        (funct3::SRL_SRA, _) => "srli",
        _ => "sh?",
    }
}

fn load_name(f3: u32) -> &'static str {
    match f3 {
        funct3::LB => "lb",
        funct3::LH => "lh",
        _ => "lw",
    }
}

fn store_name(f3: u32) -> &'static str {
    match f3 {
        funct3::SB => "sb",
        funct3::SH => "sh",
        _ => "sw",
    }
}

fn branch_name(f3: u32) -> &'static str {
    match f3 {
        funct3::BEQ => "beq",
        funct3::BNE => "bne",
        _ => "b?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop_disassembles_as_nop() {
        assert_eq!(disassemble(NOP_WORD), "nop");
    }

    #[test]
    fn ecall_disassembles_as_ecall() {
        assert_eq!(disassemble(ECALL_WORD), "ecall");
    }

    #[test]
    fn add_mnemonic() {
        // add x3, x1, x2
        let word = 0b0000000_00010_00001_000_00011_0110011u32;
        assert_eq!(disassemble(word), "add x3, x1, x2");
    }

    #[test]
    fn addi_mnemonic() {
        // addi x1, x0, 5
        let word = 0b0000000_00101_00000_000_00001_0010011u32;
        assert_eq!(disassemble(word), "addi x1, x0, 5");
    }

    #[test]
    fn unrecognized_opcode_falls_back_to_hex() {
        assert_eq!(disassemble(0x7F), "unknown(0x0000007f)");
    }
}
