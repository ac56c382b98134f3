use std::collections::VecDeque;

use super::Lcdc;
use crate::error::Result;
use crate::machine::AddressSpace;

/// Host ticks spent in each fetcher state.
const TICKS_PER_STATE: u8 = 2;
/// Pixels in one tile row.
const TILE_WIDTH: u16 = 8;
/// The fetcher sleeps while the FIFO holds more than this many entries.
pub(super) const FIFO_LOW_WATER: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetcherState {
    TileIndex,
    TileDataLow,
    TileDataHigh,
    Sleep,
    Push,
}

/// One queued pixel: a 2-bit color index and the palette it resolves
/// through (0 = BGP).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FifoEntry {
    pub color: u8,
    pub palette: u8,
}

/// Register values the fetcher reads for the current line.
#[derive(Clone, Copy, Debug)]
pub(super) struct LineParams {
    pub(super) lcdc: Lcdc,
    pub(super) scx: u8,
    pub(super) scy: u8,
    pub(super) ly: u8,
}

impl LineParams {
    /// Background row being drawn.
    #[inline]
    fn bg_y(&self) -> u8 {
        self.scy.wrapping_add(self.ly)
    }
}

/// Address of the first byte of tile `index` for the addressing mode
/// selected by LCDC bit 4.
pub(super) fn tile_data_address(lcdc: Lcdc, index: u8) -> u16 {
    if lcdc.contains(Lcdc::TILE_DATA) {
        0x8000 + u16::from(index) * 16
    } else if index < 128 {
        0x9000 + u16::from(index) * 16
    } else {
        0x8800 + u16::from(index - 128) * 16
    }
}

#[derive(Clone, Debug)]
pub(super) struct Fetcher {
    state: FetcherState,
    ticks: u8,
    tile_index: u8,
    tile_address: u16,
    tile_row: u8,
    data_low: u8,
    data_high: u8,
    /// Horizontal fetch cursor in pixels from the start of the line.
    fetch_x: u16,
}

impl Fetcher {
    pub(super) fn new() -> Self {
        Self {
            state: FetcherState::TileIndex,
            ticks: 0,
            tile_index: 0,
            tile_address: 0,
            tile_row: 0,
            data_low: 0,
            data_high: 0,
            fetch_x: 0,
        }
    }

    #[inline]
    pub(super) fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub(super) fn state(&self) -> FetcherState {
        self.state
    }

    /// Advance the fetcher by one host tick.
    pub(super) fn tick(
        &mut self,
        memory: &AddressSpace,
        line: &LineParams,
        fifo: &mut VecDeque<FifoEntry>,
    ) -> Result<()> {
        if self.state == FetcherState::Sleep && fifo.len() > FIFO_LOW_WATER {
            self.ticks = 0;
            return Ok(());
        }

        self.ticks += 1;
        if self.ticks < TICKS_PER_STATE {
            return Ok(());
        }
        self.ticks = 0;

        self.state = match self.state {
            FetcherState::TileIndex => {
                self.fetch_tile_index(memory, line)?;
                FetcherState::TileDataLow
            }
            FetcherState::TileDataLow => {
                self.data_low = self.fetch_tile_byte(memory, 0)?;
                FetcherState::TileDataHigh
            }
            FetcherState::TileDataHigh => {
                self.data_high = self.fetch_tile_byte(memory, 1)?;
                FetcherState::Sleep
            }
            FetcherState::Sleep => FetcherState::Push,
            FetcherState::Push => {
                self.push_row(fifo);
                FetcherState::TileIndex
            }
        };
        Ok(())
    }

    fn fetch_tile_index(&mut self, memory: &AddressSpace, line: &LineParams) -> Result<()> {
        let map_base: u16 = if line.lcdc.contains(Lcdc::BG_TILE_MAP) {
            0x9C00
        } else {
            0x9800
        };
        let bg_y = line.bg_y();
        let map_row = u16::from(bg_y / 8) * 32;
        let map_col = ((u16::from(line.scx) + self.fetch_x) / TILE_WIDTH) % 32;

        self.tile_index = memory.peek_bank(map_base + map_row + map_col, 0)?;
        self.tile_address = tile_data_address(line.lcdc, self.tile_index);
        self.tile_row = bg_y % 8;
        self.fetch_x += TILE_WIDTH;
        Ok(())
    }

    /// One bitplane byte of the current tile row; `plane` is 0 or 1.
    #[inline]
    fn fetch_tile_byte(&self, memory: &AddressSpace, plane: u16) -> Result<u8> {
        let addr = self.tile_address + u16::from(self.tile_row) * 2 + plane;
        memory.peek_bank(addr, 0)
    }

    /// Queue the eight pixels of the fetched row, leftmost (bit 7) first.
    fn push_row(&mut self, fifo: &mut VecDeque<FifoEntry>) {
        for bit in (0..8).rev() {
            let lo = (self.data_low >> bit) & 0x01;
            let hi = (self.data_high >> bit) & 0x01;
            fifo.push_back(FifoEntry {
                color: (hi << 1) | lo,
                palette: 0,
            });
        }
    }
}
