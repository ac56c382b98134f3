use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    /// STOP consumes its padding byte and then idles like HALT until an
    /// enabled interrupt becomes pending.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let _padding = self.fetch8(bus)?;
        log::debug!("STOP at pc=0x{:04X}", self.regs.pc.wrapping_sub(2));
        self.halted = true;
        Ok(4)
    }

    pub(super) fn exec_halt(&mut self) -> u32 {
        self.halted = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    /// IME becomes set once the instruction after EI has completed.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_enable_pending = true;
        4
    }
}
