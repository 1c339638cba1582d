//! Error types surfaced by the simulator core.
//!
//! Every fault the pipeline can raise is fatal: there is no local recovery,
//! only a `Result` that the caller turns into a process exit code.

use thiserror::Error;

/// A fatal simulation error.
///
/// `step`/`run_until_halt` return `Result<StepOutcome, SimError>`; an `Err`
/// terminates the run. Stalls, flushes, and cache misses are not errors —
/// they are counted events, not faults.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// Decode saw an opcode it does not recognize.
    #[error("invalid instruction {word:#010x} at pc {pc:#010x}")]
    InvalidInstruction { pc: u32, word: u32 },

    /// A load targeted an address outside the memory image.
    #[error("invalid read of {len} byte(s) at {addr:#010x}")]
    InvalidRead { addr: u32, len: u32 },

    /// A store targeted an address outside the memory image.
    #[error("invalid write of {len} byte(s) at {addr:#010x}")]
    InvalidWrite { addr: u32, len: u32 },

    /// A word/half access was not naturally aligned.
    ///
    /// The default configuration never raises this: unaligned loads and
    /// stores are permitted, matching the C source this was ported from.
    /// It exists so a stricter configuration (or test) can opt in.
    #[error("misaligned access at {addr:#010x}")]
    MisalignedAccess { addr: u32 },
}
