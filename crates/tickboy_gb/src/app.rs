use anyhow::Result;
use tickboy_common::app::App;

use crate::machine::{LCDC_ADDR, STAT_ADDR};
use crate::{GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Frontend-facing wrapper for the Game Boy machine.
///
/// Implements the shared `App` trait so a runner can drive the emulator in
/// bursts of master ticks and pick up finished frames.
pub struct GameBoyApp {
    should_exit: bool,
    pub gb: GameBoy,
    frame_counter: u64,
    last_pc: u16,
    pc_stagnant_frames: u32,
}

impl GameBoyApp {
    pub fn new(gb: GameBoy) -> Self {
        Self {
            should_exit: false,
            gb,
            frame_counter: 0,
            last_pc: 0,
            pc_stagnant_frames: 0,
        }
    }

    /// Frames completed so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame_counter
    }

    fn log_progress(&mut self) {
        let pc = self.gb.cpu.pc();
        if pc == self.last_pc {
            self.pc_stagnant_frames = self.pc_stagnant_frames.saturating_add(1);
        } else {
            self.pc_stagnant_frames = 0;
            self.last_pc = pc;
        }

        if self.frame_counter == 1 || self.frame_counter % 60 == 0 {
            let regs = &self.gb.cpu.regs;
            let bus = &self.gb.bus;
            log::info!(
                "GB: frame={} pc=0x{:04X} sp=0x{:04X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} ime={} halted={} LCDC=0x{:02X} STAT=0x{:02X} LY={}",
                self.frame_counter,
                regs.pc,
                regs.sp,
                regs.af(),
                regs.bc(),
                regs.de(),
                regs.hl(),
                self.gb.cpu.ime,
                self.gb.cpu.halted,
                bus.peek(LCDC_ADDR).unwrap_or(0),
                bus.peek(STAT_ADDR).unwrap_or(0),
                bus.ppu().scanline(),
            );
        }

        if self.pc_stagnant_frames == 600 {
            log::warn!(
                "GB: PC unchanged for ~600 frames at 0x{:04X} (halted={})",
                pc,
                self.gb.cpu.halted,
            );
        }
    }
}

impl App for GameBoyApp {
    fn init(&mut self) {
        log::info!(
            "Game Boy init: pc=0x{:04X} boot_rom={} cartridge={:?}",
            self.gb.cpu.pc(),
            self.gb.bus.boot_rom_active(),
            self.gb.bus.cartridge_header().map(|h| h.title.as_str()),
        );
        self.last_pc = self.gb.cpu.pc();
    }

    fn update(&mut self, ticks: u64, screen: &mut [u8]) -> Result<()> {
        let frames_before = self.gb.frames();
        self.gb.run_ticks(ticks)?;

        for _ in frames_before..self.gb.frames() {
            self.frame_counter = self.frame_counter.wrapping_add(1);
            self.log_progress();
        }

        let frame = self.gb.framebuffer();
        let len = frame.len().min(screen.len());
        screen[..len].copy_from_slice(&frame[..len]);
        Ok(())
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("Game Boy exit after {} frame(s)", self.frame_counter);
        self.should_exit = true;
    }

    fn width(&self) -> u32 {
        SCREEN_WIDTH as u32
    }

    fn height(&self) -> u32 {
        SCREEN_HEIGHT as u32
    }

    fn title(&self) -> String {
        match self.gb.bus.cartridge_header() {
            Some(header) if !header.title.is_empty() => format!("tickboy - {}", header.title),
            _ => "tickboy".to_string(),
        }
    }

    fn master_frequency(&self) -> u64 {
        self.gb.scheduler().master_frequency()
    }

    fn ticks_per_frame(&self) -> u64 {
        self.gb.frame_ticks()
    }
}
