use super::{Bus, Cpu};
use crate::error::Result;

/// Address of the interrupt flag register.
pub(crate) const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt enable register.
pub(crate) const IE_ADDR: u16 = 0xFFFF;

impl Cpu {
    /// Service the lowest pending interrupt if IME allows it.
    ///
    /// Also wakes the core from HALT as soon as any enabled interrupt is
    /// pending, whether or not IME is set. Returns the entry cost when an
    /// interrupt was taken.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Result<Option<u32>> {
        let ie = bus.read8(IE_ADDR)?;
        let iflags = bus.read8(IF_ADDR)?;
        let pending = ie & iflags & 0x1F;
        if pending == 0 {
            return Ok(None);
        }

        if self.halted {
            log::debug!("wake from HALT: IE=0x{:02X} IF=0x{:02X}", ie, iflags);
            self.halted = false;
        }

        if !self.ime {
            return Ok(None);
        }

        let index = pending.trailing_zeros() as u16;
        let vector = 0x0040 + index * 8;
        log::debug!(
            "interrupt {} -> 0x{:04X} from pc=0x{:04X} sp=0x{:04X}",
            index,
            vector,
            self.regs.pc,
            self.regs.sp,
        );

        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        bus.write8(IF_ADDR, iflags & !(1 << index))?;
        let pc = self.regs.pc;
        self.push_u16(bus, pc)?;
        self.regs.pc = vector;

        Ok(Some(20))
    }

    /// Apply the delayed IME change requested by EI.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
