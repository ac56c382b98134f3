mod fetcher;
mod palette;

use std::collections::VecDeque;

use bitflags::bitflags;

pub use fetcher::{FetcherState, FifoEntry};
use fetcher::{Fetcher, LineParams, FIFO_LOW_WATER};

use super::AddressSpace;
use crate::cpu::IF_ADDR;
use crate::error::Result;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub(crate) const LCDC_ADDR: u16 = 0xFF40;
pub(crate) const STAT_ADDR: u16 = 0xFF41;
pub(crate) const SCY_ADDR: u16 = 0xFF42;
pub(crate) const SCX_ADDR: u16 = 0xFF43;
pub(crate) const LY_ADDR: u16 = 0xFF44;
pub(crate) const LYC_ADDR: u16 = 0xFF45;
pub(crate) const BGP_ADDR: u16 = 0xFF47;

const OAM_SEARCH_TICKS: u16 = 80;
const LINE_TICKS: u16 = 456;
const VBLANK_START: u8 = SCREEN_HEIGHT as u8;
const LINES_PER_FRAME: u8 = 154;
const VBLANK_INTERRUPT: u8 = 0x01;

bitflags! {
    /// LCD control register (0xFF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        const BG_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        const OBJ_SIZE = 1 << 2;
        const BG_TILE_MAP = 1 << 3;
        const TILE_DATA = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        const WINDOW_TILE_MAP = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

/// PPU mode; the discriminant is the value reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamSearch = 2,
    PixelTransfer = 3,
}

/// Scanline renderer driven one dot per tick.
///
/// Each line spends 80 ticks in OAM search, runs the background fetcher
/// and pixel FIFO until 160 pixels are out, then idles in HBlank until
/// the line's 456 ticks are used up. Lines 144-153 are VBlank.
#[derive(Clone, Debug)]
pub struct Ppu {
    mode: Mode,
    scanline: u8,
    column: u8,
    line_ticks: u16,
    fetcher: Fetcher,
    fifo: VecDeque<FifoEntry>,
    /// Pixels still to drop at the start of the line for fine X scroll.
    discard: u8,
    framebuffer: Vec<u8>,
    frame_ready: bool,
    frames: u64,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            mode: Mode::OamSearch,
            scanline: 0,
            column: 0,
            line_ticks: 0,
            fetcher: Fetcher::new(),
            fifo: VecDeque::with_capacity(16),
            discard: 0,
            framebuffer: vec![0xFF; SCREEN_WIDTH * SCREEN_HEIGHT * 3],
            frame_ready: false,
            frames: 0,
        }
    }

    /// Advance by one dot. Does nothing while the LCD is switched off.
    pub fn tick(&mut self, memory: &mut AddressSpace) -> Result<()> {
        let lcdc = Lcdc::from_bits_retain(memory.read(LCDC_ADDR)?);
        if !lcdc.contains(Lcdc::LCD_ENABLE) {
            return Ok(());
        }

        self.line_ticks += 1;
        match self.mode {
            Mode::OamSearch => {
                if self.line_ticks == OAM_SEARCH_TICKS {
                    self.start_transfer(memory)?;
                }
            }
            Mode::PixelTransfer => {
                self.transfer_tick(memory, lcdc)?;
                if usize::from(self.column) == SCREEN_WIDTH {
                    self.column = 0;
                    self.set_mode(memory, Mode::HBlank)?;
                }
            }
            Mode::HBlank => {
                if self.line_ticks == LINE_TICKS {
                    self.next_line();
                    if self.scanline == VBLANK_START {
                        self.enter_vblank(memory)?;
                    } else {
                        self.set_mode(memory, Mode::OamSearch)?;
                    }
                }
            }
            Mode::VBlank => {
                if self.line_ticks == LINE_TICKS {
                    self.next_line();
                    if self.scanline == LINES_PER_FRAME {
                        self.reset_frame();
                        self.set_mode(memory, Mode::OamSearch)?;
                    } else {
                        self.update_stat(memory)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn start_transfer(&mut self, memory: &mut AddressSpace) -> Result<()> {
        self.fetcher.reset();
        self.fifo.clear();
        self.column = 0;
        self.discard = memory.read(SCX_ADDR)? & 0x07;
        self.set_mode(memory, Mode::PixelTransfer)
    }

    fn transfer_tick(&mut self, memory: &AddressSpace, lcdc: Lcdc) -> Result<()> {
        let bgp = memory.read(BGP_ADDR)?;

        if !lcdc.contains(Lcdc::BG_ENABLE) {
            // Background off: the line shows palette index 0.
            self.put_pixel(bgp, 0);
            return Ok(());
        }

        let line = LineParams {
            lcdc,
            scx: memory.read(SCX_ADDR)?,
            scy: memory.read(SCY_ADDR)?,
            ly: self.scanline,
        };
        self.fetcher.tick(memory, &line, &mut self.fifo)?;

        if self.fifo.len() > FIFO_LOW_WATER {
            if let Some(entry) = self.fifo.pop_front() {
                if self.discard > 0 {
                    self.discard -= 1;
                } else {
                    self.put_pixel(bgp, entry.color);
                }
            }
        }
        Ok(())
    }

    fn put_pixel(&mut self, palette: u8, color: u8) {
        let index = (usize::from(self.scanline) * SCREEN_WIDTH + usize::from(self.column)) * 3;
        palette::shade(palette, color).write_rgb(&mut self.framebuffer[index..index + 3]);
        self.column += 1;
    }

    #[inline]
    fn next_line(&mut self) {
        self.line_ticks = 0;
        self.scanline += 1;
    }

    fn enter_vblank(&mut self, memory: &mut AddressSpace) -> Result<()> {
        self.frame_ready = true;
        self.frames += 1;
        let iflags = memory.read(IF_ADDR)?;
        memory.write(IF_ADDR, iflags | VBLANK_INTERRUPT)?;
        log::debug!("PPU: frame {} complete, VBlank requested", self.frames);
        self.set_mode(memory, Mode::VBlank)
    }

    fn reset_frame(&mut self) {
        self.scanline = 0;
        self.column = 0;
        self.line_ticks = 0;
        self.fetcher.reset();
        self.fifo.clear();
    }

    fn set_mode(&mut self, memory: &mut AddressSpace, mode: Mode) -> Result<()> {
        self.mode = mode;
        self.update_stat(memory)
    }

    /// Recompute STAT's mode and coincidence bits after a CPU write to
    /// STAT or LYC.
    #[inline]
    pub(crate) fn refresh_stat(&self, memory: &mut AddressSpace) -> Result<()> {
        self.update_stat(memory)
    }

    /// Mirror the mode and the LY=LYC coincidence into STAT.
    fn update_stat(&self, memory: &mut AddressSpace) -> Result<()> {
        let stat = memory.read(STAT_ADDR)?;
        let coincidence = u8::from(self.scanline == memory.read(LYC_ADDR)?) << 2;
        memory.write(STAT_ADDR, (stat & 0xF8) | coincidence | self.mode as u8)
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current line, as reported through LY.
    #[inline]
    pub fn scanline(&self) -> u8 {
        self.scanline
    }

    #[inline]
    pub fn column(&self) -> u8 {
        self.column
    }

    #[inline]
    pub fn fetcher_state(&self) -> FetcherState {
        self.fetcher.state()
    }

    pub fn fifo(&self) -> impl Iterator<Item = &FifoEntry> {
        self.fifo.iter()
    }

    /// 160x144 RGB24 pixels.
    #[inline]
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True once per completed frame.
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }
}
