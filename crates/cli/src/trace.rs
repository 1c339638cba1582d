//! Register-dump formatting, external to the simulator core:
//! `pipe5_core::Cpu::dump_state` hands back plain data; this module is
//! the only place that decides how it looks on a terminal.

use pipe5_core::RegisterDump;

/// ABI mnemonics for x0..x31, printed alongside the raw index — the same
/// convention `objdump -d` and every RISC-V disassembler use.
const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Prints `PC` and all 32 registers, two per line as `x{idx}={value}`
/// pairs, widened to 32-bit hex and annotated with the ABI name.
pub fn print_register_dump(dump: &RegisterDump) {
    println!("PC = {:#010x}", dump.pc);
    for i in (0..32).step_by(2) {
        println!(
            "x{:<2}({:<4})={:#010x}  x{:<2}({:<4})={:#010x}",
            i,
            ABI_NAMES[i],
            dump.regs[i],
            i + 1,
            ABI_NAMES[i + 1],
            dump.regs[i + 1],
        );
    }
}
