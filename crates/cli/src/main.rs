//! Command-line driver for the five-stage pipeline simulator.
//!
//! This binary is a thin external collaborator: it loads a flat binary
//! image, builds a [`pipe5_core::Config`], runs the core to completion,
//! and prints whatever trace/stats/register output the config or CLI
//! flags asked for. None of this is part of the simulator's
//! architectural behavior — swapping it out for a different driver
//! (a `wasm`/language-bindings front end, say) would not change a
//! single cycle.

mod loader;
mod trace;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pipe5_core::{Config, Cpu, StepOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "pipe5",
    author,
    version,
    about = "Cycle-accurate five-stage pipeline simulator",
    long_about = "Runs a flat little-endian-word binary image through the five-stage \
pipeline core to completion (the `ecall` halt trap with a0 == 10) and reports the \
cycle/stall/forward/cache statistics the core collected.\n\n\
Example:\n  pipe5 --trace --stats program.bin"
)]
struct Cli {
    /// Flat binary image: raw little-endian 32-bit instruction words.
    binary: PathBuf,

    /// TOML configuration file (cache geometry, latencies, pipeline
    /// width, tracing toggles). CLI flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Entry PC (fetch start address). Accepts `0x`-prefixed hex.
    #[arg(long, default_value = "0x0", value_parser = parse_u32)]
    entry: u32,

    /// Simulated memory size in bytes; the image is zero-padded up to
    /// this size. Accepts `0x`-prefixed hex.
    #[arg(long, default_value = "0x10000", value_parser = parse_u32)]
    mem_size: u32,

    /// Enable the dual-fetch front end (component K), overriding the
    /// config file's `pipeline_width`.
    #[arg(long)]
    dual_issue: bool,

    /// Emit the `[IF|ID|EX|MEM|WB]: ...` per-stage trace line every cycle.
    #[arg(long)]
    trace: bool,

    /// Print the register file at halt.
    #[arg(long)]
    reg_trace: bool,

    /// Print the `SimStats` report at halt.
    #[arg(long)]
    stats: bool,

    /// Restrict `--stats` output to these sections (comma-separated:
    /// summary, core, instruction_mix, memory). Default: all.
    #[arg(long, value_delimiter = ',')]
    stats_sections: Vec<String>,

    /// Emit a `[status: ...]` line for every data cache access.
    #[arg(long)]
    cache_trace: bool,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else {
        s.parse::<u32>().map_err(|e| e.to_string())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli);

    let binary_path = cli.binary.to_string_lossy().into_owned();
    let image = loader::load_flat(&binary_path, cli.mem_size);

    let mut cpu = Cpu::new(&image, cli.entry, config);

    tracing::info!(binary = %binary_path, entry = %format!("{:#x}", cli.entry), "starting simulation");

    loop {
        match cpu.step() {
            Ok(StepOutcome::Continue) => {}
            Ok(StepOutcome::Halted) => break,
            Err(err) => {
                eprintln!("[!] FATAL: {err}");
                trace::print_register_dump(&cpu.dump_state());
                cpu.stats().print();
                process::exit(1);
            }
        }
    }

    println!("[*] Halted at pc={:#010x}", cpu.dump_state().pc);

    if cli.reg_trace {
        trace::print_register_dump(&cpu.dump_state());
    }
    if cli.stats {
        cpu.stats().print_sections(&cli.stats_sections);
    }
}

/// Builds the effective config: a TOML file if `--config` was given
/// (else defaults), then CLI flags layered on top — a flag only ever
/// turns a toggle *on*, so a config file already enabling tracing is
/// never silently muted by an absent flag.
fn load_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {e}", path.display());
                process::exit(1);
            });
            toml::from_str(&text).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: invalid config '{}': {e}", path.display());
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if cli.dual_issue {
        config.pipeline_width = 2;
    }
    config.trace.debug_cycle |= cli.trace;
    config.trace.debug_reg_trace |= cli.reg_trace;
    config.trace.print_stats |= cli.stats;
    config.trace.print_cache_traces |= cli.cache_trace;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u32_accepts_hex_and_decimal() {
        assert_eq!(parse_u32("0x100").unwrap(), 0x100);
        assert_eq!(parse_u32("256").unwrap(), 256);
    }

    #[test]
    fn parse_u32_rejects_garbage() {
        assert!(parse_u32("not-a-number").is_err());
    }
}
