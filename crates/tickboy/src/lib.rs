use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tickboy_common::app::App;
use tickboy_gb::{GameBoy, GameBoyApp, MachineConfig};
use typed_builder::TypedBuilder;

/// Largest burst handed to the machine in one paced update.
const MAX_BURST_TICKS: u64 = 1 << 16;
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// What to load and how long to run.
#[derive(Debug, TypedBuilder)]
pub struct RunOptions {
    #[builder(default)]
    pub rom: Option<Vec<u8>>,
    #[builder(default)]
    pub boot_rom: Option<Vec<u8>>,
    /// Run this many frames as fast as possible and stop. `None` runs
    /// paced to real time until the machine fails.
    #[builder(default)]
    pub frames: Option<u64>,
    /// Where to write the final framebuffer as raw RGB24.
    #[builder(default)]
    pub dump: Option<PathBuf>,
    #[builder(default)]
    pub config: MachineConfig,
}

pub fn run(options: RunOptions) -> Result<()> {
    let mut gb = GameBoy::new(options.config).context("invalid machine configuration")?;
    if let Some(boot_rom) = &options.boot_rom {
        gb.load_boot_rom(boot_rom).context("failed to load boot ROM")?;
    }
    if let Some(rom) = &options.rom {
        gb.load_rom(rom).context("failed to load cartridge")?;
    }

    let mut app = GameBoyApp::new(gb);
    let mut screen = vec![0u8; (app.width() * app.height() * 3) as usize];
    app.init();

    let outcome = match options.frames {
        Some(frames) => run_frames(&mut app, frames, &mut screen),
        None => run_paced(&mut app, &mut screen),
    };
    app.exit();

    // A paced run only ends on a fatal error; the last frame is still
    // written before that error is returned.
    let dumped = match &options.dump {
        Some(path) => dump_framebuffer(path, &screen),
        None => Ok(()),
    };
    outcome.and(dumped)
}

fn dump_framebuffer(path: &Path, screen: &[u8]) -> Result<()> {
    std::fs::write(path, screen)
        .with_context(|| format!("failed to write framebuffer to {}", path.display()))?;
    log::info!("framebuffer written to {}", path.display());
    Ok(())
}

/// Run `frames` frames' worth of ticks without pacing.
pub fn run_frames<A: App>(app: &mut A, frames: u64, screen: &mut [u8]) -> Result<()> {
    let ticks = app.ticks_per_frame();
    for _ in 0..frames {
        app.update(ticks, screen)?;
    }
    Ok(())
}

/// Run in bursts, matching executed ticks to wall-clock time at the
/// app's master frequency.
pub fn run_paced<A: App>(app: &mut A, screen: &mut [u8]) -> Result<()> {
    let frequency = u128::from(app.master_frequency());
    let start = Instant::now();
    let mut executed: u64 = 0;

    while !app.should_exit() {
        let due = (start.elapsed().as_nanos() * frequency / 1_000_000_000) as u64;
        let behind = due.saturating_sub(executed);
        if behind == 0 {
            thread::sleep(IDLE_SLEEP);
            continue;
        }

        let burst = behind.min(MAX_BURST_TICKS);
        if behind > burst {
            log::warn!("running behind, dropping {} ticks", behind - burst);
            executed = due - burst;
        }
        app.update(burst, screen)?;
        executed += burst;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
