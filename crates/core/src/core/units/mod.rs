//! Pure functional units the pipeline stages drive: the ALU and the data
//! cache.

pub mod alu;
pub mod cache;
