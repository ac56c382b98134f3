mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod operand;
mod regs;

pub use alu::{is_carry, is_carry_subtraction};
pub use bus::Bus;
pub(crate) use interrupts::{IE_ADDR, IF_ADDR};
pub use regs::{Flag, Registers};

use crate::error::Result;

/// SM83 instruction core.
///
/// The core is driven one master tick at a time through [`Cpu::tick`]. An
/// instruction executes in full on the tick that fetches it and books its
/// cycle cost into `wait_cycles`; the following ticks just pay that cost
/// down before the next fetch.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Ticks left before the next fetch. Zero or negative means due.
    wait_cycles: i32,
    /// Total T-cycles booked since power-on.
    cycles: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Advance the core by one tick of its clock.
    pub fn tick<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        self.wait_cycles -= 1;
        if self.wait_cycles > 0 {
            return Ok(());
        }

        let cost = self.step(bus)?;
        self.wait_cycles += cost as i32;
        Ok(())
    }

    /// Execute one instruction (or interrupt entry, or one HALT idle step)
    /// and return its cost in T-cycles.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some(cycles) = self.handle_interrupts(bus)? {
            self.cycles += u64::from(cycles);
            return Ok(cycles);
        }

        if self.halted {
            self.cycles += 4;
            return Ok(4);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch8(bus)?;
        log::trace!(
            "pc=0x{:04X} op=0x{:02X} af=0x{:04X} bc=0x{:04X} de=0x{:04X} hl=0x{:04X} sp=0x{:04X}",
            pc,
            opcode,
            self.regs.af(),
            self.regs.bc(),
            self.regs.de(),
            self.regs.hl(),
            self.regs.sp,
        );
        let cycles = self.exec_opcode(bus, opcode)?;
        self.apply_ime_delay();
        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    #[inline]
    pub fn sp(&self) -> u16 {
        self.regs.sp
    }

    /// Remaining ticks before the next fetch.
    #[inline]
    pub fn wait_cycles(&self) -> i32 {
        self.wait_cycles
    }

    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.cycles
    }
}

#[cfg(test)]
mod tests;
