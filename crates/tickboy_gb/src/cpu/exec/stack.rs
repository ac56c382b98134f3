use crate::cpu::operand::Reg16Stack;
use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));
        let value = self.read_reg16_stack(Reg16Stack::decode(opcode));
        self.push_u16(bus, value)?;
        Ok(16)
    }

    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));
        let value = self.pop_u16(bus)?;
        self.write_reg16_stack(Reg16Stack::decode(opcode), value);
        Ok(12)
    }
}
