use typed_builder::TypedBuilder;

use super::cartridge::CartridgeHeader;
use super::{Apu, GameBoyBus, Scheduler, UnitKind};
use crate::cpu::Cpu;
use crate::error::Result;

/// DMG master clock in Hz.
pub const DMG_CLOCK: u64 = 4_194_304;
/// PPU dots in one frame: 154 lines of 456.
pub const TICKS_PER_FRAME: u64 = 154 * 456;

/// Unit clock rates. Every rate must divide the master rate.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    #[builder(default = DMG_CLOCK)]
    pub master_frequency: u64,
    #[builder(default = DMG_CLOCK)]
    pub cpu_frequency: u64,
    #[builder(default = DMG_CLOCK)]
    pub ppu_frequency: u64,
    #[builder(default = DMG_CLOCK)]
    pub apu_frequency: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A complete DMG: CPU, bus with its devices, APU and the scheduler that
/// drives them off one master clock.
pub struct GameBoy {
    pub cpu: Cpu,
    pub bus: GameBoyBus,
    apu: Apu,
    scheduler: Scheduler,
    /// Master ticks per PPU frame.
    frame_ticks: u64,
}

impl GameBoy {
    pub fn new(config: MachineConfig) -> Result<Self> {
        let mut scheduler = Scheduler::new(config.master_frequency)?;
        scheduler.register(UnitKind::Cpu, config.cpu_frequency)?;
        scheduler.register(UnitKind::Ppu, config.ppu_frequency)?;
        scheduler.register(UnitKind::Apu, config.apu_frequency)?;

        let frame_ticks = TICKS_PER_FRAME * (config.master_frequency / config.ppu_frequency);
        log::debug!("machine: {:?}, {} ticks per frame", config, frame_ticks);

        Ok(Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new()?,
            apu: Apu::default(),
            scheduler,
            frame_ticks,
        })
    }

    /// Map a boot ROM and reset the CPU to run it from 0x0000.
    pub fn load_boot_rom(&mut self, image: &[u8]) -> Result<()> {
        self.bus.load_boot_rom(image)?;
        self.cpu.reset(true);
        Ok(())
    }

    /// Insert a cartridge image.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<CartridgeHeader> {
        self.bus.load_cartridge(rom)
    }

    /// Advance the master clock by one tick, running every unit due on it.
    pub fn tick(&mut self) -> Result<()> {
        let cycle = self.scheduler.cycle();
        for kind in self.scheduler.due() {
            let outcome = match kind {
                UnitKind::Cpu => self.cpu.tick(&mut self.bus),
                UnitKind::Ppu => self.bus.tick_ppu(),
                UnitKind::Apu => {
                    self.apu.tick();
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                log::error!("{:?} failed at master cycle {}: {}", kind, cycle, err);
                return Err(err);
            }
        }
        self.scheduler.advance();
        Ok(())
    }

    pub fn run_ticks(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Run until the PPU completes a frame.
    ///
    /// Gives up after one frame's worth of ticks plus one, which only
    /// happens with the LCD switched off; returns whether a frame was
    /// produced.
    pub fn step_frame(&mut self) -> Result<bool> {
        for _ in 0..=self.frame_ticks {
            self.tick()?;
            if self.bus.ppu.take_frame_ready() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[inline]
    pub fn frame_ticks(&self) -> u64 {
        self.frame_ticks
    }

    /// 160x144 RGB24 pixels of the most recent frame.
    #[inline]
    pub fn framebuffer(&self) -> &[u8] {
        self.bus.ppu.framebuffer()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.bus.ppu.frames()
    }

    #[inline]
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial_output()
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn apu(&self) -> &Apu {
        &self.apu
    }
}
