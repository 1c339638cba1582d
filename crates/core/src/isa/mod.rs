//! Instruction decoder, immediate reconstruction, and the opcode/funct
//! constant tables the rest of the core is built on.

pub mod immediate;
pub mod instruction;
pub mod mnemonic;
pub mod opcodes;

pub use instruction::{decode, Instruction};
pub use mnemonic::disassemble;
