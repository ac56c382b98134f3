use crate::cpu::alu::ShiftOp;
use crate::cpu::operand::{Operand8, Reg16};
use crate::cpu::{Bus, Cpu, Flag};
use crate::error::Result;

impl Cpu {
    /// Apply the ALU operation in bits 3-5 to A.
    fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    pub(super) fn exec_alu_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let src = Operand8::decode(opcode, 0);
        let value = self.read_operand(bus, src)?;
        self.alu_dispatch(opcode >> 3, value);
        Ok(if src.is_memory() { 8 } else { 4 })
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<u32> {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));
        let value = self.fetch8(bus)?;
        self.alu_dispatch(opcode >> 3, value);
        Ok(8)
    }

    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        // 0x07, 0x0F, 0x17, 0x1F map onto RLC, RRC, RL, RR.
        let op = ShiftOp::TABLE[usize::from(opcode >> 3)];
        self.regs.a = self.alu_shift(op, self.regs.a, false);
        4
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.read_reg16(Reg16::decode(opcode));
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_e8<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let offset = self.fetch_displacement(bus)?;
        self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
        Ok(16)
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flag::N, true);
        self.regs.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.regs.flag(Flag::C);
        self.regs.set_flag(Flag::N, false);
        self.regs.set_flag(Flag::H, false);
        self.regs.set_flag(Flag::C, !carry);
        4
    }
}
