//! Flat-binary program loader.
//!
//! Reads a file of raw little-endian 32-bit instruction words into a
//! byte vector sized to at least `mem_size`, padding the remainder with
//! repeated `NOP_WORD` words (not zero bytes) so loads/stores past the
//! program image still land inside the simulated address space, and a
//! fetch that runs past the program's last real instruction decodes as
//! a harmless bubble rather than faulting with `InvalidInstruction` — a
//! bare zero word has opcode `0`, which is not one of the seven
//! recognized formats.
//!
//! ELF images are not accepted: this loader only ever reads flat words,
//! matching a `*(uint32_t *)(memory_p + PC)` fetch path.

use std::process;

use pipe5_core::isa::opcodes::NOP_WORD;

/// Reads `path` and returns a byte image at least `mem_size` bytes long.
///
/// Exits the process with a diagnostic on read failure: a loader has no
/// caller that can sensibly recover from a missing program image.
pub fn load_flat(path: &str, mem_size: u32) -> Vec<u8> {
    let mut image = std::fs::read(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: could not read program image '{path}': {e}");
        process::exit(1);
    });
    let mem_size = mem_size as usize;
    let nop_bytes = NOP_WORD.to_le_bytes();
    while image.len() < mem_size {
        image.extend_from_slice(&nop_bytes);
    }
    image
}
