use super::GameBoyBus;
use crate::cpu::{IE_ADDR, IF_ADDR};
use crate::error::Result;
use crate::machine::Region;

/// I/O register values the DMG boot ROM leaves behind.
const POST_BOOT_IO: &[(u16, u8)] = &[
    // Joypad, serial.
    (0xFF00, 0xCF),
    (0xFF01, 0x00),
    (0xFF02, 0x7E),
    // Divider and timer.
    (0xFF04, 0xAB),
    (0xFF05, 0x00),
    (0xFF06, 0x00),
    (0xFF07, 0xF8),
    (IF_ADDR, 0x01),
    // Sound.
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
    // LCD.
    (0xFF40, 0x91),
    (0xFF41, 0x85),
    (0xFF42, 0x00),
    (0xFF43, 0x00),
    (0xFF45, 0x00),
    (0xFF46, 0xFF),
    (0xFF47, 0xFC),
    (0xFF48, 0xFF),
    (0xFF49, 0xFF),
    (0xFF4A, 0x00),
    (0xFF4B, 0x00),
    // Boot ROM already unmapped.
    (0xFF50, 0x01),
    (IE_ADDR, 0x00),
];

impl GameBoyBus {
    /// Map the regions that exist with or without a cartridge.
    pub(super) fn map_system_regions(&mut self) -> Result<()> {
        let layout = [
            (Region::VideoRam, 2),
            (Region::WorkRam0, 1),
            (Region::WorkRamN, 7),
            (Region::EchoRam, 1),
            (Region::Oam, 1),
            (Region::NotUsable, 1),
            (Region::Io, 1),
            (Region::HighRam, 1),
            (Region::InterruptEnable, 1),
        ];
        for (region, banks) in layout {
            self.memory.add_default_region(region, banks)?;
        }
        Ok(())
    }

    /// Put the I/O registers in the state software finds at 0x0100 when
    /// no boot ROM ran.
    pub(super) fn apply_post_boot_io_state(&mut self) -> Result<()> {
        for &(addr, value) in POST_BOOT_IO {
            self.memory.write(addr, value)?;
        }
        Ok(())
    }

    /// Zero the I/O registers, as at power-on before a boot ROM runs.
    pub(crate) fn clear_io_state(&mut self) -> Result<()> {
        self.memory.fill(Region::Io, 0x00)?;
        self.memory.write(IE_ADDR, 0x00)
    }
}
