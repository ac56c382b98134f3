mod mbc1;

use mbc1::Mbc1;

use crate::error::{Error, Result};

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;
const HEADER_END: usize = 0x0150;

/// Bank controller family, from header byte 0x0147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartridgeKind {
    RomOnly,
    Mbc1,
}

/// The parts of the cartridge header the machine cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub kind: CartridgeKind,
    /// Total 16 KiB ROM banks, bank 0 included.
    pub rom_banks: usize,
    /// 8 KiB external RAM banks; zero when the cartridge has none.
    pub ram_banks: usize,
}

impl CartridgeHeader {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(Error::HeaderTooShort { len: rom.len() });
        }

        let title = rom[0x0134..=0x0143]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();

        let cartridge_type = rom[0x0147];
        let kind = match cartridge_type {
            0x00 => CartridgeKind::RomOnly,
            0x01..=0x03 => CartridgeKind::Mbc1,
            other => {
                log::warn!("unsupported cartridge type 0x{:02X}, treating as ROM only", other);
                CartridgeKind::RomOnly
            }
        };

        let rom_size = rom[0x0148];
        let rom_banks = if rom_size <= 0x08 {
            2usize << rom_size
        } else {
            let banks = (rom.len() / ROM_BANK_SIZE).max(2);
            log::warn!("unknown ROM size code 0x{:02X}, using {} banks from image", rom_size, banks);
            banks
        };

        let ram_banks = match rom[0x0149] {
            0x01 | 0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        };

        Ok(Self {
            title,
            cartridge_type,
            kind,
            rom_banks,
            ram_banks,
        })
    }
}

/// Bank numbers a controller write asks the bus to select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BankSelection {
    /// Bank mapped at 0x4000-0x7FFF, counted from bank 0 of the image.
    pub(crate) rom: usize,
    pub(crate) ram: usize,
}

enum Controller {
    RomOnly,
    Mbc1(Mbc1),
}

/// A loaded cartridge image and its bank controller state.
pub(crate) struct Cartridge {
    header: CartridgeHeader,
    rom: Vec<u8>,
    controller: Controller,
}

impl Cartridge {
    pub(crate) fn new(rom: &[u8]) -> Result<Self> {
        let header = CartridgeHeader::parse(rom)?;
        let controller = match header.kind {
            CartridgeKind::RomOnly => Controller::RomOnly,
            CartridgeKind::Mbc1 => Controller::Mbc1(Mbc1::new(header.rom_banks, header.ram_banks)),
        };
        if rom.len() < header.rom_banks * ROM_BANK_SIZE {
            log::warn!(
                "ROM image is {} bytes, header declares {} banks; padding with 0xFF",
                rom.len(),
                header.rom_banks
            );
        }
        Ok(Self {
            header,
            rom: rom.to_vec(),
            controller,
        })
    }

    #[inline]
    pub(crate) fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    /// 16 KiB bank `index` of the image, padded with 0xFF past its end.
    pub(crate) fn rom_bank(&self, index: usize) -> Vec<u8> {
        let start = index * ROM_BANK_SIZE;
        let mut bank = vec![0xFF; ROM_BANK_SIZE];
        if start < self.rom.len() {
            let end = (start + ROM_BANK_SIZE).min(self.rom.len());
            bank[..end - start].copy_from_slice(&self.rom[start..end]);
        }
        bank
    }

    /// External RAM banks to map; at least one so the window is backed.
    #[inline]
    pub(crate) fn ram_bank_count(&self) -> usize {
        self.header.ram_banks.max(1)
    }

    pub(crate) fn ram_enabled(&self) -> bool {
        match &self.controller {
            Controller::RomOnly => true,
            Controller::Mbc1(mbc) => mbc.ram_enabled(),
        }
    }

    /// Feed a write to 0x0000-0x7FFF to the controller.
    ///
    /// Returns the banks to select afterwards, or `None` when the
    /// cartridge has no controller and the write is dropped.
    pub(crate) fn write_control(&mut self, addr: u16, value: u8) -> Option<BankSelection> {
        match &mut self.controller {
            Controller::RomOnly => {
                log::debug!("write 0x{:02X} to ROM 0x{:04X} ignored", value, addr);
                None
            }
            Controller::Mbc1(mbc) => {
                mbc.write(addr, value);
                Some(BankSelection {
                    rom: mbc.rom_bank(),
                    ram: mbc.ram_bank(),
                })
            }
        }
    }
}
