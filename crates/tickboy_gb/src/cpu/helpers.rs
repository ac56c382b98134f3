use super::operand::{sign_extend, Condition, Operand8, Reg16, Reg16Stack};
use super::{Bus, Cpu, Flag};
use crate::error::Result;

impl Cpu {
    /// Read an 8-bit register, or the byte at HL.
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand8) -> Result<u8> {
        Ok(match operand {
            Operand8::B => self.regs.b,
            Operand8::C => self.regs.c,
            Operand8::D => self.regs.d,
            Operand8::E => self.regs.e,
            Operand8::H => self.regs.h,
            Operand8::L => self.regs.l,
            Operand8::HlIndirect => bus.read8(self.regs.hl())?,
            Operand8::A => self.regs.a,
        })
    }

    #[inline]
    pub(super) fn write_operand<B: Bus>(
        &mut self,
        bus: &mut B,
        operand: Operand8,
        value: u8,
    ) -> Result<()> {
        match operand {
            Operand8::B => self.regs.b = value,
            Operand8::C => self.regs.c = value,
            Operand8::D => self.regs.d = value,
            Operand8::E => self.regs.e = value,
            Operand8::H => self.regs.h = value,
            Operand8::L => self.regs.l = value,
            Operand8::HlIndirect => bus.write8(self.regs.hl(), value)?,
            Operand8::A => self.regs.a = value,
        }
        Ok(())
    }

    #[inline]
    pub(super) fn read_reg16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.regs.bc(),
            Reg16::DE => self.regs.de(),
            Reg16::HL => self.regs.hl(),
            Reg16::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_reg16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.regs.set_bc(value),
            Reg16::DE => self.regs.set_de(value),
            Reg16::HL => self.regs.set_hl(value),
            Reg16::SP => self.regs.sp = value,
        }
    }

    #[inline]
    pub(super) fn read_reg16_stack(&self, reg: Reg16Stack) -> u16 {
        match reg {
            Reg16Stack::BC => self.regs.bc(),
            Reg16Stack::DE => self.regs.de(),
            Reg16Stack::HL => self.regs.hl(),
            Reg16Stack::AF => self.regs.af(),
        }
    }

    #[inline]
    pub(super) fn write_reg16_stack(&mut self, reg: Reg16Stack, value: u16) {
        match reg {
            Reg16Stack::BC => self.regs.set_bc(value),
            Reg16Stack::DE => self.regs.set_de(value),
            Reg16Stack::HL => self.regs.set_hl(value),
            Reg16Stack::AF => self.regs.set_af(value),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cc: Condition) -> bool {
        match cc {
            Condition::NZ => !self.regs.flag(Flag::Z),
            Condition::Z => self.regs.flag(Flag::Z),
            Condition::NC => !self.regs.flag(Flag::C),
            Condition::C => self.regs.flag(Flag::C),
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> Result<u8> {
        let value = bus.read8(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    /// Fetch a little-endian 16-bit immediate.
    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> Result<u16> {
        let lo = self.fetch8(bus)?;
        let hi = self.fetch8(bus)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Fetch a signed 8-bit displacement.
    #[inline]
    pub(super) fn fetch_displacement<B: Bus>(&mut self, bus: &mut B) -> Result<i16> {
        Ok(sign_extend(self.fetch8(bus)?))
    }

    /// Push high byte then low byte; the low byte ends up at the lower
    /// address.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<()> {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo)
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> Result<u16> {
        let lo = bus.read8(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// JR / JR cc. The displacement is relative to the address after the
    /// operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<u32> {
        let offset = self.fetch_displacement(bus)?;
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
            Ok(12)
        } else {
            Ok(8)
        }
    }

    /// JP a16 / JP cc,a16.
    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<u32> {
        let addr = self.fetch16(bus)?;
        if cond {
            self.regs.pc = addr;
            Ok(16)
        } else {
            Ok(12)
        }
    }

    /// CALL a16 / CALL cc,a16.
    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<u32> {
        let addr = self.fetch16(bus)?;
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret)?;
            self.regs.pc = addr;
            Ok(24)
        } else {
            Ok(12)
        }
    }

    /// RET cc. Unconditional RET is cheaper and handled separately.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> Result<u32> {
        if cond {
            self.regs.pc = self.pop_u16(bus)?;
            Ok(20)
        } else {
            Ok(8)
        }
    }
}
