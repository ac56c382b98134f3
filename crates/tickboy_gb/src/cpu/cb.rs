use super::alu::ShiftOp;
use super::operand::Operand8;
use super::{Bus, Cpu, Flag};
use crate::error::Result;

impl Cpu {
    /// Fetch the second opcode byte after 0xCB and run the bit operation.
    ///
    /// Costs: 8 cycles on a register, 16 on (HL), except BIT b,(HL) which
    /// only reads and costs 12.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let cb = self.fetch8(bus)?;
        let target = Operand8::decode(cb, 0);
        let bit = (cb >> 3) & 0x07;
        let value = self.read_operand(bus, target)?;

        match cb {
            // RLC RRC RL RR SLA SRA SWAP SRL
            0x00..=0x3F => {
                let op = ShiftOp::TABLE[usize::from(bit)];
                let result = self.alu_shift(op, value, true);
                self.write_operand(bus, target, result)?;
            }
            // BIT b, r
            0x40..=0x7F => {
                self.regs.set_flag(Flag::Z, value & (1 << bit) == 0);
                self.regs.set_flag(Flag::N, false);
                self.regs.set_flag(Flag::H, true);
                return Ok(if target.is_memory() { 12 } else { 8 });
            }
            // RES b, r
            0x80..=0xBF => self.write_operand(bus, target, value & !(1 << bit))?,
            // SET b, r
            0xC0..=0xFF => self.write_operand(bus, target, value | (1 << bit))?,
        }

        Ok(if target.is_memory() { 16 } else { 8 })
    }
}
