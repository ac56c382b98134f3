use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tickboy::RunOptions;

/// Tick-scheduled DMG emulator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Cartridge ROM image
    #[arg(long)]
    rom: Option<PathBuf>,

    /// Boot ROM image, run before the cartridge
    #[arg(long)]
    boot_rom: Option<PathBuf>,

    /// Run this many frames unpaced, then exit
    #[arg(long)]
    frames: Option<u64>,

    /// Write the final framebuffer as raw 160x144 RGB24 to this file
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    log::info!("Reading image: '{}'", path.display());
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.rom.is_none() && args.boot_rom.is_none() {
        bail!("nothing to run: pass --rom and/or --boot-rom");
    }

    let rom = args.rom.as_deref().map(read_image).transpose()?;
    let boot_rom = args.boot_rom.as_deref().map(read_image).transpose()?;

    let options = RunOptions::builder()
        .rom(rom)
        .boot_rom(boot_rom)
        .frames(args.frames)
        .dump(args.dump)
        .build();
    tickboy::run(options)
}
