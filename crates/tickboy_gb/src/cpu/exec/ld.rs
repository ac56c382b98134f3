use crate::cpu::operand::{Operand8, Reg16};
use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));
        let value = self.fetch16(bus)?;
        self.write_reg16(Reg16::decode(opcode), value);
        Ok(12)
    }

    /// Address for the `(BC)`, `(DE)`, `(HL+)`, `(HL-)` column, applying the
    /// post-increment or post-decrement of HL.
    fn indirect_address(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));
        let addr = self.indirect_address(opcode);
        bus.write8(addr, self.regs.a)?;
        Ok(8)
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));
        let addr = self.indirect_address(opcode);
        self.regs.a = bus.read8(addr)?;
        Ok(8)
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        let dst = Operand8::decode(opcode, 3);
        let value = self.fetch8(bus)?;
        self.write_operand(bus, dst, value)?;
        Ok(if dst.is_memory() { 12 } else { 8 })
    }

    /// LD r, r' over 0x40-0x7F, HALT (0x76) excluded.
    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let dst = Operand8::decode(opcode, 3);
        let src = Operand8::decode(opcode, 0);
        let value = self.read_operand(bus, src)?;
        self.write_operand(bus, dst, value)?;
        Ok(if dst.is_memory() || src.is_memory() { 8 } else { 4 })
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let addr = self.fetch16(bus)?;
        let [hi, lo] = self.regs.sp.to_be_bytes();
        bus.write8(addr, lo)?;
        bus.write8(addr.wrapping_add(1), hi)?;
        Ok(20)
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        let addr = 0xFF00 | u16::from(self.fetch8(bus)?);
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr)?;
        }
        Ok(12)
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        let addr = 0xFF00 | u16::from(self.regs.c);
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr)?;
        }
        Ok(8)
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        let addr = self.fetch16(bus)?;
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a)?;
        } else {
            self.regs.a = bus.read8(addr)?;
        }
        Ok(16)
    }

    pub(super) fn exec_ld_hl_sp_e8<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let offset = self.fetch_displacement(bus)?;
        let result = self.alu_add16_signed(self.regs.sp, offset);
        self.regs.set_hl(result);
        Ok(12)
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }
}
