use thiserror::Error;

use crate::machine::Region;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised by the emulator core.
///
/// None of these are recovered from locally; they propagate up to whoever
/// drives the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("illegal opcode 0x{opcode:02X} at pc=0x{pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
    #[error("no memory region is mapped at 0x{address:04X}")]
    UnmappedAddress { address: u16 },
    #[error("no cartridge loaded (access to header byte 0x{address:04X})")]
    NoCartridge { address: u16 },
    #[error("register at 0x{address:04X} is read-only")]
    ReadOnlyRegister { address: u16 },
    #[error("region {name:?} 0x{start:04X}-0x{end:04X} overlaps {existing:?}")]
    RegionOverlap {
        name: Region,
        start: u16,
        end: u16,
        existing: Region,
    },
    #[error("region {name:?} has an invalid layout: 0x{start:04X}-0x{end:04X} with {banks} bank(s)")]
    InvalidRegion {
        name: Region,
        start: u16,
        end: u16,
        banks: usize,
    },
    #[error("region {name:?} is not mapped")]
    UnknownRegion { name: Region },
    #[error("region {name:?} has {banks} bank(s), bank {bank} does not exist")]
    InvalidBank {
        name: Region,
        bank: usize,
        banks: usize,
    },
    #[error("cartridge image should be at least 0x150 bytes, was {len} bytes")]
    HeaderTooShort { len: usize },
    #[error("invalid machine configuration: {0}")]
    InvalidConfig(String),
}
