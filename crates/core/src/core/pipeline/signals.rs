//! The control bundle carried from decode through the rest of the
//! pipeline, and the closed ALU operation enumerations it is built from.

/// The coarse ALU-operand-class the control generator assigns an
/// instruction, consumed by [`crate::core::units::alu::gen_alu_control`]
/// to pick the refined [`AluOp`].
///
/// The C source this was ported from uses a raw integer for this (`0x10`
/// in one code path, `0x2` in another, for the same R-type class) — see
/// open question 2. Here it is a closed enum; `Store` shares the `Load`
/// variant because both compute `rs1 + imm` identically, exactly as the
/// control table specifies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluClass {
    #[default]
    RType,
    IType,
    Load,
    Lui,
    Jal,
    Branch,
}

/// Which value feeds the ALU's second operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluSrcB {
    #[default]
    Imm,
    Reg,
}

/// The refined operation tag `gen_alu_control` produces, and the ALU
/// executes directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    #[default]
    Add,
    Sub,
    Sll,
    Slt,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Mul,
    /// High 32 bits of an **unsigned** 32x32 product — see the open
    /// question on `mulh` signedness in the design notes.
    Mulh,
    Lui,
    /// `operand1 + 4`, the link value written to `rd` by `jal`.
    JalLink,
    /// Unrecognized `(AluClass, funct3, funct7)` combination. The ALU
    /// returns the sentinel `0xBADCAFFE` for this tag; it is never used
    /// for control flow.
    Unknown,
}

/// The control bundle latched from ID/EX onward.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    pub alu_class: AluClass,
    pub alu_src_b: AluSrcB,
    pub branch: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub mem_to_reg: bool,
    pub reg_write: bool,
    pub funct3: u32,
    pub funct7: u32,
}

impl ControlSignals {
    /// The all-zero bundle inserted as a bubble: writes nothing, branches
    /// nowhere, touches no memory.
    #[must_use]
    pub fn bubble() -> Self {
        Self::default()
    }
}
