use crate::cpu::operand::{Operand8, Reg16};
use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        let target = Operand8::decode(opcode, 3);
        let value = self.read_operand(bus, target)?;
        let result = self.alu_inc8(value);
        self.write_operand(bus, target, result)?;
        Ok(if target.is_memory() { 12 } else { 4 })
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        let target = Operand8::decode(opcode, 3);
        let value = self.read_operand(bus, target)?;
        let result = self.alu_dec8(value);
        self.write_operand(bus, target, result)?;
        Ok(if target.is_memory() { 12 } else { 4 })
    }

    // 16-bit INC/DEC leave every flag untouched.
    pub(super) fn exec_inc16_rr(&mut self, opcode: u8) -> u32 {
        let reg = Reg16::decode(opcode);
        let value = self.read_reg16(reg).wrapping_add(1);
        self.write_reg16(reg, value);
        8
    }

    pub(super) fn exec_dec16_rr(&mut self, opcode: u8) -> u32 {
        let reg = Reg16::decode(opcode);
        let value = self.read_reg16(reg).wrapping_sub(1);
        self.write_reg16(reg, value);
        8
    }
}
