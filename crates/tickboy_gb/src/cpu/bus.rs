use crate::error::Result;

/// Byte-addressed view of memory as seen by the CPU.
///
/// Both operations are fallible: an access that no region claims is a
/// fatal error for the whole machine.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> Result<u8>;
    fn write8(&mut self, addr: u16, value: u8) -> Result<()>;
}
