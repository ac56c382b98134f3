mod address_space;
mod apu;
mod bus;
mod cartridge;
mod gameboy;
mod loader;
mod ppu;
mod scheduler;
mod serial;

pub use address_space::{AddressSpace, MemoryRegion, Region};
pub use apu::Apu;
pub use bus::GameBoyBus;
pub use cartridge::{CartridgeHeader, CartridgeKind, RAM_BANK_SIZE, ROM_BANK_SIZE};
pub use gameboy::{GameBoy, MachineConfig, DMG_CLOCK, TICKS_PER_FRAME};
pub use ppu::{FetcherState, FifoEntry, Lcdc, Mode, Ppu};
pub(crate) use ppu::{LCDC_ADDR, STAT_ADDR};
pub use scheduler::{Scheduler, UnitKind};

use serial::Serial;
