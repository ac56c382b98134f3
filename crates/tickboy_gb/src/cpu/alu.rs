use super::{Cpu, Flag};

/// True when the sum `lhs + rhs` carries into `limit_bit`.
///
/// `limit_bit` is the first bit above the checked width: 0x10 is the half
/// carry of an 8-bit add, 0x100 its full carry, 0x1000 and 0x10000 the same
/// pair for 16-bit adds. Negative right-hand operands are passed as their
/// two's complement bit pattern.
#[inline]
pub fn is_carry(lhs: u32, rhs: u32, limit_bit: u32) -> bool {
    carry_into(lhs, rhs, lhs.wrapping_add(rhs), limit_bit)
}

/// True when the difference `lhs - rhs` borrows from `limit_bit`.
#[inline]
pub fn is_carry_subtraction(lhs: u32, rhs: u32, limit_bit: u32) -> bool {
    carry_into(lhs, rhs, lhs.wrapping_sub(rhs), limit_bit)
}

/// Carry (or borrow) that crossed into `limit_bit` while producing `result`
/// from the two operands. Also valid when an incoming carry was folded
/// into `result`.
#[inline]
fn carry_into(lhs: u32, rhs: u32, result: u32, limit_bit: u32) -> bool {
    (lhs ^ rhs ^ result) & limit_bit != 0
}

/// The eight rotate/shift operations shared by the CB table and the
/// accumulator rotates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    pub(super) const TABLE: [ShiftOp; 8] = [
        ShiftOp::Rlc,
        ShiftOp::Rrc,
        ShiftOp::Rl,
        ShiftOp::Rr,
        ShiftOp::Sla,
        ShiftOp::Sra,
        ShiftOp::Swap,
        ShiftOp::Srl,
    ];

    /// Returns the shifted value and the carry-out bit.
    pub(super) fn apply(self, value: u8, carry_in: bool) -> (u8, bool) {
        match self {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        }
    }
}

impl Cpu {
    /// ADD/ADC on A. `use_carry` selects ADC.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = u32::from(self.regs.a);
        let v = u32::from(value);
        let carry_in = u32::from(use_carry && self.regs.flag(Flag::C));
        let full = a + v + carry_in;
        let result = full as u8;

        self.regs.a = result;
        self.regs.set_flags(
            result == 0,
            false,
            carry_into(a, v, full, 0x10),
            carry_into(a, v, full, 0x100),
        );
    }

    /// SUB/SBC on A. `use_carry` selects SBC.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry);
        self.regs.a = result;
    }

    /// CP: SUB without storing the result.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, use_carry: bool) -> u8 {
        let a = u32::from(self.regs.a);
        let v = u32::from(value);
        let borrow_in = u32::from(use_carry && self.regs.flag(Flag::C));
        let full = a.wrapping_sub(v).wrapping_sub(borrow_in);
        let result = full as u8;

        self.regs.set_flags(
            result == 0,
            true,
            carry_into(a, v, full, 0x10),
            carry_into(a, v, full, 0x100),
        );
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.regs.set_flags(self.regs.a == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.regs.set_flags(self.regs.a == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.regs.set_flags(self.regs.a == 0, false, false, false);
    }

    /// Decimal-adjust A after a BCD addition or subtraction.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let subtract = self.regs.flag(Flag::N);
        let half = self.regs.flag(Flag::H);
        let mut carry = self.regs.flag(Flag::C);
        let mut adjust = 0u8;

        if subtract {
            if carry {
                adjust |= 0x60;
            }
            if half {
                adjust |= 0x06;
            }
            a = a.wrapping_sub(adjust);
        } else {
            if carry || a > 0x99 {
                adjust |= 0x60;
                carry = true;
            }
            if half || (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            a = a.wrapping_add(adjust);
        }

        self.regs.a = a;
        self.regs.set_flags(a == 0, subtract, false, carry);
    }

    /// INC r / INC (HL). C is preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, is_carry(u32::from(value), 1, 0x10));
        result
    }

    /// DEC r / DEC (HL). C is preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.regs.set_flag(Flag::Z, result == 0);
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, is_carry_subtraction(u32::from(value), 1, 0x10));
        result
    }

    /// ADD HL,rr. Z is preserved, carries come from bits 11 and 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = u32::from(self.regs.hl());
        let v = u32::from(value);

        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, is_carry(hl, v, 0x1000));
        self.regs.set_flag(Flag::C, is_carry(hl, v, 0x10000));
        self.regs.set_hl(hl.wrapping_add(v) as u16);
    }

    /// SP plus a signed displacement, shared by ADD SP,e8 and LD HL,SP+e8.
    ///
    /// Carries are taken from the low byte as for an 8-bit add; Z and N
    /// are cleared.
    pub(super) fn alu_add16_signed(&mut self, base: u16, offset: i16) -> u16 {
        let b = u32::from(base);
        let o = offset as u16 as u32;
        self.regs.set_flags(false, false, is_carry(b, o, 0x10), is_carry(b, o, 0x100));
        base.wrapping_add(offset as u16)
    }

    /// Rotate/shift `value` and set flags. `zero_flag` is false for the
    /// accumulator rotates, which always clear Z.
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8, zero_flag: bool) -> u8 {
        let (result, carry) = op.apply(value, self.regs.flag(Flag::C));
        self.regs.set_flags(zero_flag && result == 0, false, false, carry);
        result
    }
}
