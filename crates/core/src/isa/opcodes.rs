//! Opcode and funct field constants for the seven recognized formats.

pub const OP_R: u32 = 0x33;
pub const OP_I: u32 = 0x13;
pub const OP_LOAD: u32 = 0x03;
pub const OP_STORE: u32 = 0x23;
pub const OP_BRANCH: u32 = 0x63;
pub const OP_LUI: u32 = 0x37;
pub const OP_JAL: u32 = 0x6F;
pub const OP_SYSTEM: u32 = 0x73;

pub mod funct3 {
    pub const LB: u32 = 0b000;
    pub const LH: u32 = 0b001;
    pub const LW: u32 = 0b010;

    pub const SB: u32 = 0b000;
    pub const SH: u32 = 0b001;
    pub const SW: u32 = 0b010;

    pub const BEQ: u32 = 0b000;
    pub const BNE: u32 = 0b001;

    pub const ADD_SUB: u32 = 0b000;
    pub const SLL: u32 = 0b001;
    pub const SLT: u32 = 0b010;
    pub const SLTU: u32 = 0b011;
    pub const XOR: u32 = 0b100;
    pub const SRL_SRA: u32 = 0b101;
    pub const OR: u32 = 0b110;
    pub const AND: u32 = 0b111;
}

pub mod funct7 {
    pub const DEFAULT: u32 = 0b0000000;
    pub const SUB_SRA: u32 = 0b0100000;
    pub const MUL_EXT: u32 = 0b0000001;
}

/// The raw word of `ecall`/halt: opcode `SYSTEM`, all other fields zero.
pub const ECALL_WORD: u32 = 0x0000_0073;

/// `addi x0, x0, 0` — the bubble/NOP instruction word.
pub const NOP_WORD: u32 = 0x0000_0013;
