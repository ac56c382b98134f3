use super::GameBoyBus;
use crate::cpu::{Bus, IF_ADDR};
use crate::error::{Error, Result};
use crate::machine::ppu::{LYC_ADDR, LY_ADDR, STAT_ADDR};
use crate::machine::Region;

const SB_ADDR: u16 = 0xFF01;
const SC_ADDR: u16 = 0xFF02;
const DMA_ADDR: u16 = 0xFF46;
const VBK_ADDR: u16 = 0xFF4F;
const BOOT_OFF_ADDR: u16 = 0xFF50;
const SVBK_ADDR: u16 = 0xFF70;

const OAM_START: u16 = 0xFE00;
const OAM_LEN: u16 = 0xA0;

/// SC value that starts a transfer on the internal clock.
const SERIAL_START: u8 = 0x81;
const SERIAL_BUSY: u8 = 0x80;
const SERIAL_INTERRUPT: u8 = 0x08;
/// Unused IF bits read back as set.
const IF_UNUSED: u8 = 0xE0;
/// STAT bits software may write; mode and coincidence belong to the PPU.
const STAT_WRITABLE: u8 = 0x78;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> Result<u8> {
        self.peek(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<()> {
        match addr {
            0x0000..=0x7FFF => self.write_cartridge_control(addr, value),
            0xA000..=0xBFFF if !self.cartridge_ram_enabled() => {
                self.memory.owner(addr)?;
                log::debug!("write 0x{:02X} to disabled cartridge RAM 0x{:04X}", value, addr);
                Ok(())
            }
            LY_ADDR => {
                log::error!("write 0x{:02X} to read-only LY", value);
                Err(Error::ReadOnlyRegister { address: addr })
            }
            STAT_ADDR => {
                let stored = self.memory.read(addr)?;
                self.memory
                    .write(addr, (value & STAT_WRITABLE) | (stored & 0x07))
            }
            LYC_ADDR => {
                self.memory.write(addr, value)?;
                self.ppu.refresh_stat(&mut self.memory)
            }
            SC_ADDR => self.write_serial_control(value),
            DMA_ADDR => self.oam_dma(value),
            VBK_ADDR => {
                self.memory.write(addr, value)?;
                self.memory
                    .select_bank(Region::VideoRam, usize::from(value & 0x01))
            }
            BOOT_OFF_ADDR => {
                self.memory.write(addr, value)?;
                if self.boot_rom_active {
                    self.disable_boot_rom()?;
                }
                Ok(())
            }
            SVBK_ADDR => {
                self.memory.write(addr, value)?;
                // Bank 0 selects bank 1.
                let bank = usize::from(value & 0x07).max(1);
                self.memory.select_bank(Region::WorkRamN, bank - 1)
            }
            _ => self.memory.write(addr, value),
        }
    }
}

impl GameBoyBus {
    /// Read `addr` the way the CPU sees it, without side effects.
    pub fn peek(&self, addr: u16) -> Result<u8> {
        match addr {
            LY_ADDR => Ok(self.ppu.scanline()),
            IF_ADDR => Ok(self.memory.read(addr)? | IF_UNUSED),
            0xA000..=0xBFFF if !self.cartridge_ram_enabled() => {
                self.memory.owner(addr)?;
                Ok(0xFF)
            }
            _ => self.memory.read(addr),
        }
    }

    /// Set bits in IF.
    pub(crate) fn request_interrupt(&mut self, mask: u8) -> Result<()> {
        let iflags = self.memory.read(IF_ADDR)?;
        self.memory.write(IF_ADDR, iflags | mask)
    }

    fn cartridge_ram_enabled(&self) -> bool {
        self.cartridge.as_ref().map_or(true, |c| c.ram_enabled())
    }

    fn write_cartridge_control(&mut self, addr: u16, value: u8) -> Result<()> {
        let Some(cartridge) = self.cartridge.as_mut() else {
            let owner = self.memory.owner(addr)?;
            log::warn!("write 0x{:02X} to {:?} at 0x{:04X} ignored", value, owner, addr);
            return Ok(());
        };

        if let Some(selection) = cartridge.write_control(addr, value) {
            self.memory
                .select_bank(Region::CartridgeRomN, selection.rom - 1)?;
            self.memory.select_bank(Region::CartridgeRam, selection.ram)?;
        }
        Ok(())
    }

    fn write_serial_control(&mut self, value: u8) -> Result<()> {
        if value & SERIAL_START != SERIAL_START {
            return self.memory.write(SC_ADDR, value);
        }

        let byte = self.memory.read(SB_ADDR)?;
        self.serial.transfer(byte);
        // The transfer completes at once.
        self.memory.write(SC_ADDR, value & !SERIAL_BUSY)?;
        self.request_interrupt(SERIAL_INTERRUPT)
    }

    /// Copy 160 bytes from `value << 8` into OAM.
    fn oam_dma(&mut self, value: u8) -> Result<()> {
        self.memory.write(DMA_ADDR, value)?;
        let source = u16::from(value) << 8;
        for offset in 0..OAM_LEN {
            let byte = self.peek(source + offset)?;
            self.memory.write(OAM_START + offset, byte)?;
        }
        log::trace!("OAM DMA from 0x{:04X}", source);
        Ok(())
    }
}
