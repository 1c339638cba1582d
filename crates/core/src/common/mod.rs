//! Shared leaf types: errors, address helpers, the register file.

pub mod addr;
pub mod error;
pub mod reg;

pub use addr::{split_addr, sign_extend, AddrSplit};
pub use error::SimError;
pub use reg::RegisterFile;
