use super::bus::GameBoyBus;
use super::cartridge::{Cartridge, CartridgeHeader};
use super::Region;
use crate::error::{Error, Result};

/// Boot image bytes 0x0100-0x01FF sit under the cartridge header and are
/// never mapped.
const BOOT_ROM1_LEN: usize = 0x0100;
const BOOT_ROM2_OFFSET: usize = 0x0200;

impl GameBoyBus {
    /// Map a boot ROM image over the bottom of the address space.
    ///
    /// Must happen before a cartridge is inserted, since the cartridge
    /// maps differently while a boot ROM is active.
    pub(crate) fn load_boot_rom(&mut self, image: &[u8]) -> Result<()> {
        if self.cartridge.is_some() {
            return Err(Error::InvalidConfig(
                "boot ROM must be loaded before the cartridge".to_string(),
            ));
        }
        if image.is_empty() {
            return Err(Error::InvalidConfig("boot ROM image is empty".to_string()));
        }
        for region in [Region::BootRom1, Region::BootRom2] {
            if self.memory.is_mapped(region) {
                self.memory.remove_region(region)?;
            }
        }

        self.memory.add_default_region(Region::BootRom1, 1)?;
        self.memory
            .load(Region::BootRom1, 0, &image[..image.len().min(BOOT_ROM1_LEN)])?;
        if image.len() > BOOT_ROM1_LEN {
            self.memory.add_default_region(Region::BootRom2, 1)?;
            let rest = image.get(BOOT_ROM2_OFFSET..).unwrap_or_default();
            self.memory.load(Region::BootRom2, 0, rest)?;
        }

        self.boot_rom_active = true;
        self.clear_io_state()?;
        log::info!("boot ROM loaded, {} bytes", image.len());
        Ok(())
    }

    /// Insert a cartridge and map its ROM and RAM banks.
    pub(crate) fn load_cartridge(&mut self, rom: &[u8]) -> Result<CartridgeHeader> {
        if self.cartridge.is_some() {
            return Err(Error::InvalidConfig(
                "a cartridge is already loaded".to_string(),
            ));
        }

        let cartridge = Cartridge::new(rom)?;
        let header = cartridge.header().clone();
        let bank0 = cartridge.rom_bank(0);

        if self.boot_rom_active {
            let (start, end) = Region::CartridgeHeader.range();
            self.memory.add_default_region(Region::CartridgeHeader, 1)?;
            self.memory.load(
                Region::CartridgeHeader,
                0,
                &bank0[usize::from(start)..=usize::from(end)],
            )?;
        } else {
            self.memory.add_default_region(Region::CartridgeRom0, 1)?;
            self.memory.load(Region::CartridgeRom0, 0, &bank0)?;
        }

        // Bank i of the image backs switchable bank i - 1.
        self.memory
            .add_default_region(Region::CartridgeRomN, header.rom_banks - 1)?;
        for bank in 1..header.rom_banks {
            self.memory
                .load(Region::CartridgeRomN, bank - 1, &cartridge.rom_bank(bank))?;
        }

        self.memory
            .add_default_region(Region::CartridgeRam, cartridge.ram_bank_count())?;

        log::info!(
            "cartridge \"{}\": type 0x{:02X} ({:?}), {} ROM bank(s), {} RAM bank(s)",
            header.title,
            header.cartridge_type,
            header.kind,
            header.rom_banks,
            header.ram_banks
        );
        self.cartridge = Some(cartridge);
        Ok(header)
    }

    /// Handle the write to 0xFF50: drop the boot ROM and expose the full
    /// first cartridge bank.
    pub(crate) fn disable_boot_rom(&mut self) -> Result<()> {
        for region in [Region::BootRom1, Region::BootRom2, Region::CartridgeHeader] {
            if self.memory.is_mapped(region) {
                self.memory.remove_region(region)?;
            }
        }
        if let Some(cartridge) = &self.cartridge {
            let bank0 = cartridge.rom_bank(0);
            self.memory.add_default_region(Region::CartridgeRom0, 1)?;
            self.memory.load(Region::CartridgeRom0, 0, &bank0)?;
        }
        self.boot_rom_active = false;
        log::info!("boot ROM disabled");
        Ok(())
    }
}
