mod init;
mod mmio;

use super::cartridge::{Cartridge, CartridgeHeader};
use super::{AddressSpace, Ppu, Serial};
use crate::error::Result;

/// The system bus the CPU talks to.
///
/// Owns the address space together with the devices whose registers live
/// in it. Register side effects (LY, boot ROM disable, serial, DMA, bank
/// selects, cartridge control) are applied here before falling through to
/// the plain region store.
pub struct GameBoyBus {
    pub(crate) memory: AddressSpace,
    pub(crate) ppu: Ppu,
    pub(crate) serial: Serial,
    pub(crate) cartridge: Option<Cartridge>,
    pub(crate) boot_rom_active: bool,
}

impl GameBoyBus {
    /// A bus with every cartridge-independent region mapped and the I/O
    /// registers in their post-boot state.
    pub(crate) fn new() -> Result<Self> {
        let mut bus = Self {
            memory: AddressSpace::new(),
            ppu: Ppu::new(),
            serial: Serial::default(),
            cartridge: None,
            boot_rom_active: false,
        };
        bus.map_system_regions()?;
        bus.apply_post_boot_io_state()?;
        Ok(bus)
    }

    #[inline]
    pub(crate) fn tick_ppu(&mut self) -> Result<()> {
        self.ppu.tick(&mut self.memory)
    }

    #[inline]
    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    #[inline]
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Bytes sent over the serial port so far.
    #[inline]
    pub fn serial_output(&self) -> &[u8] {
        self.serial.output()
    }

    #[inline]
    pub fn boot_rom_active(&self) -> bool {
        self.boot_rom_active
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.cartridge.as_ref().map(Cartridge::header)
    }
}
