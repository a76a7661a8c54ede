//! A tiny host for the `mos6502` core: load a raw binary into RAM, point
//! the reset vector at it (or trust the bytes already there), and clock
//! the CPU forward while logging periodic register snapshots.

use anyhow::{Context, Result};
use clap::Parser;
use mos6502::{Bus, Cpu};

/// Load a ROM image into a flat 64 KiB bus and run it for a fixed number
/// of clock ticks, logging register state along the way.
#[derive(Parser, Debug)]
#[command(name = "mos6502-run", version, about)]
struct Args {
    /// Path to a raw binary image to load into RAM.
    rom: std::path::PathBuf,

    /// Address at which to load the ROM image.
    #[arg(long, value_parser = parse_hex_u16, default_value = "0x8000")]
    load_address: u16,

    /// Override the reset vector ($FFFC/$FFFD) to point at `load_address`
    /// instead of whatever bytes the ROM image itself supplies there.
    #[arg(long)]
    set_reset_vector: bool,

    /// Number of clock ticks to run.
    #[arg(long, default_value_t = 1_000)]
    ticks: u64,

    /// Print a register snapshot every `n` completed instructions.
    #[arg(long, default_value_t = 50)]
    snapshot_every: u64,
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let trimmed = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(trimmed, 16).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = std::fs::read(&args.rom)
        .with_context(|| format!("reading ROM image at {}", args.rom.display()))?;

    let mut bus = Bus::new();
    bus.load(args.load_address, &rom);

    if args.set_reset_vector {
        bus.write(0xFFFC, (args.load_address & 0x00FF) as u8);
        bus.write(0xFFFD, (args.load_address >> 8) as u8);
    }

    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    log::info!("reset complete, pc=${:04X}", cpu.pc);

    let mut instructions_completed = 0u64;
    for _ in 0..args.ticks {
        let completed = cpu.clock(&mut bus);
        if completed {
            instructions_completed += 1;
            if instructions_completed % args.snapshot_every == 0 {
                log::info!(
                    "after {} instructions: a=${:02X} x=${:02X} y=${:02X} sp=${:02X} pc=${:04X} status=${:02X}",
                    instructions_completed,
                    cpu.a,
                    cpu.x,
                    cpu.y,
                    cpu.sp,
                    cpu.pc,
                    cpu.status,
                );
            }
        }
    }

    println!("{cpu}");
    Ok(())
}
