use super::*;
use crate::error::{Error, Result};

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl TestBus {
    fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        let start = usize::from(origin);
        bus.memory[start..start + program.len()].copy_from_slice(program);
        bus
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> Result<u8> {
        Ok(self.memory[addr as usize])
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<()> {
        self.memory[addr as usize] = value;
        Ok(())
    }
}

fn cpu_at(pc: u16) -> Cpu {
    let mut cpu = Cpu::power_on();
    cpu.regs.pc = pc;
    cpu.regs.sp = 0xD000;
    cpu
}

fn flags(cpu: &Cpu) -> (bool, bool, bool, bool) {
    (
        cpu.regs.flag(Flag::Z),
        cpu.regs.flag(Flag::N),
        cpu.regs.flag(Flag::H),
        cpu.regs.flag(Flag::C),
    )
}

#[test]
fn half_and_full_carry_detection() {
    assert!(!is_carry(56, 17, 0x10));
    assert!(is_carry(46, 34, 0x10));
    assert!(!is_carry(16, (-1i32) as u32, 0x10));
    assert!(is_carry(136, (-1i32) as u32, 0x10));
    assert!(!is_carry(254, 1, 0x100));
    assert!(is_carry(254, 2, 0x100));
    assert!(is_carry(0x0FFF, 0x0001, 0x1000));
    assert!(is_carry(0xFFFF, 0x0001, 0x10000));
    assert!(!is_carry(0x7FFF, 0x0001, 0x10000));
}

#[test]
fn subtraction_borrow_detection() {
    assert!(!is_carry_subtraction(136, 1, 0x10));
    assert!(is_carry_subtraction(16, 1, 0x10));
    assert!(is_carry_subtraction(0x00, 0x01, 0x100));
    assert!(!is_carry_subtraction(0x10, 0x10, 0x100));
}

#[test]
fn post_boot_state_matches_documented_values() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.sp(), 0xFFFE);
    assert_eq!(cpu.pc(), 0x0100);

    let mut cpu = Cpu::new();
    cpu.reset(true);
    assert_eq!(cpu.regs, Registers::default());
}

#[test]
fn nop_advances_pc() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    let cycles = cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.pc(), 0x0001);
    assert_eq!(cycles, 4);
}

#[test]
fn tick_pays_down_instruction_cost_before_next_fetch() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::default();

    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0x0001);
    assert_eq!(cpu.wait_cycles(), 3);

    for _ in 0..3 {
        cpu.tick(&mut bus).unwrap();
    }
    assert_eq!(cpu.pc(), 0x0002);

    for _ in 0..4 {
        cpu.tick(&mut bus).unwrap();
    }
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.total_cycles(), 12);
}

#[test]
fn ld_sp_d16_loads_stack_pointer() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x31, 0xFE, 0xFF]);

    let cycles = cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.sp(), 0xFFFE);
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cycles, 12);
}

#[test]
fn push_bc_pop_de_round_trip() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xC5, 0xD1]);
    cpu.regs.set_bc(0x1234);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.sp(), 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x34);
    assert_eq!(bus.memory[0xCFFF], 0x12);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.de(), 0x1234);
    assert_eq!(cpu.sp(), 0xD000);
}

#[test]
fn pop_af_masks_low_nibble() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xF1]);
    bus.memory[0xD000] = 0xFF;
    bus.memory[0xD001] = 0x12;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f(), 0xF0);
    assert_eq!(cpu.regs.af(), 0x12F0);
}

#[test]
fn adc_with_carry_sets_half_carry() {
    let mut cpu = cpu_at(0x0000);
    // ADC A, E
    let mut bus = TestBus::with_program(0x0000, &[0x8B]);
    cpu.regs.a = 0xE1;
    cpu.regs.e = 0x0F;
    cpu.regs.set_flag(Flag::C, true);

    let cycles = cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0xF1);
    assert_eq!(flags(&cpu), (false, false, true, false));
    assert_eq!(cycles, 4);
}

#[test]
fn sbc_and_cp_set_subtract_flags() {
    let mut cpu = cpu_at(0x0000);
    // SBC A, B ; CP d8
    let mut bus = TestBus::with_program(0x0000, &[0x98, 0xFE, 0x0E]);
    cpu.regs.a = 0x10;
    cpu.regs.b = 0x01;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0E);
    assert_eq!(flags(&cpu), (false, true, true, false));

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x0E);
    assert_eq!(flags(&cpu), (true, true, false, false));
}

#[test]
fn logic_ops_set_documented_flags() {
    let mut cpu = cpu_at(0x0000);
    // AND d8 ; XOR A ; OR B
    let mut bus = TestBus::with_program(0x0000, &[0xE6, 0x0F, 0xAF, 0xB0]);
    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x80;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(flags(&cpu), (true, false, false, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x80);
    assert_eq!(flags(&cpu), (false, false, false, false));
}

#[test]
fn daa_corrects_addition_and_subtraction() {
    let mut cpu = cpu_at(0x0000);
    // ADD A, 0x38 ; DAA ; SUB 0x38 ; DAA
    let mut bus = TestBus::with_program(0x0000, &[0xC6, 0x38, 0x27, 0xD6, 0x38, 0x27]);
    cpu.regs.a = 0x45;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x7D);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x83);
    assert_eq!(flags(&cpu), (false, false, false, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x4B);
    assert!(cpu.regs.flag(Flag::H));
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x45);
    assert_eq!(flags(&cpu), (false, true, false, false));
}

#[test]
fn inc_dec_8bit_preserve_carry() {
    let mut cpu = cpu_at(0x0000);
    // INC B ; DEC C ; DEC D
    let mut bus = TestBus::with_program(0x0000, &[0x04, 0x0D, 0x15]);
    cpu.regs.b = 0x0F;
    cpu.regs.c = 0x01;
    cpu.regs.d = 0x10;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x10);
    assert_eq!(flags(&cpu), (false, false, true, true));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(flags(&cpu), (true, true, false, true));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.d, 0x0F);
    assert_eq!(flags(&cpu), (false, true, true, true));
}

#[test]
fn inc_hl_indirect_costs_twelve() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x34]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0xFF;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.regs.flag(Flag::Z));
}

#[test]
fn inc_dec_16bit_wrap_without_touching_flags() {
    let mut cpu = cpu_at(0x0000);
    // INC BC ; DEC DE
    let mut bus = TestBus::with_program(0x0000, &[0x03, 0x1B]);
    cpu.regs.set_bc(0xFFFF);
    cpu.regs.set_de(0x0000);
    cpu.regs.set_f(0xF0);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.bc(), 0x0000);
    assert_eq!(cpu.regs.f(), 0xF0);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.de(), 0xFFFF);
    assert_eq!(cpu.regs.f(), 0xF0);
}

#[test]
fn add_hl_rr_uses_bit_11_and_15_carries() {
    let mut cpu = cpu_at(0x0000);
    // ADD HL, BC ; ADD HL, DE
    let mut bus = TestBus::with_program(0x0000, &[0x09, 0x19]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.set_de(0xF000);
    cpu.regs.set_flag(Flag::Z, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(flags(&cpu), (true, false, true, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(flags(&cpu), (true, false, false, true));
}

#[test]
fn add_sp_e8_and_ld_hl_sp_e8_use_low_byte_carries() {
    let mut cpu = cpu_at(0x0000);
    // ADD SP, 8 ; LD HL, SP-2
    let mut bus = TestBus::with_program(0x0000, &[0xE8, 0x08, 0xF8, 0xFE]);
    cpu.regs.sp = 0xFFF8;
    cpu.regs.set_flag(Flag::Z, true);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.sp(), 0x0000);
    assert_eq!(flags(&cpu), (false, false, true, true));

    cpu.regs.sp = 0x0005;
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.hl(), 0x0003);
    assert_eq!(cpu.sp(), 0x0005);
    assert_eq!(flags(&cpu), (false, false, true, true));
}

#[test]
fn ld_r_r_and_hl_forms() {
    let mut cpu = cpu_at(0x0000);
    // LD B, C ; LD (HL), A ; LD A, (HL+) ; LD E, (HL)
    let mut bus = TestBus::with_program(0x0000, &[0x41, 0x77, 0x2A, 0x5E]);
    cpu.regs.c = 0x42;
    cpu.regs.a = 0x99;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC001] = 0x77;

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.b, 0x42);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(bus.memory[0xC000], 0x99);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.e, 0x77);
}

#[test]
fn ld_a16_sp_stores_low_byte_first() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x08, 0x00, 0xC1]);
    cpu.regs.sp = 0xBEEF;

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(bus.memory[0xC100], 0xEF);
    assert_eq!(bus.memory[0xC101], 0xBE);
}

#[test]
fn ldh_reaches_high_page() {
    let mut cpu = cpu_at(0x0000);
    // LDH (0x80), A ; LD C, 0x81 ; LDH A, (C)
    let mut bus = TestBus::with_program(0x0000, &[0xE0, 0x80, 0x0E, 0x81, 0xF2]);
    cpu.regs.a = 0x5A;
    bus.memory[0xFF81] = 0xA5;

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(bus.memory[0xFF80], 0x5A);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0xA5);
}

#[test]
fn jr_displacement_is_relative_to_next_instruction() {
    let mut cpu = cpu_at(0x0100);
    // JR -2 loops onto itself.
    let mut bus = TestBus::with_program(0x0100, &[0x18, 0xFE]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.pc(), 0x0100);
}

#[test]
fn conditional_branches_charge_taken_and_not_taken_costs() {
    let mut cpu = cpu_at(0x0000);
    // JR NZ, +2 ; JR Z, +2
    let mut bus = TestBus::with_program(0x0000, &[0x20, 0x02, 0x28, 0x02]);
    cpu.regs.set_flag(Flag::Z, true);

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.pc(), 0x0002);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.pc(), 0x0006);

    // JP NC, a16 not taken ; CALL C, a16 taken ; RET NC not taken
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xD2, 0x00, 0x20, 0xDC, 0x00, 0x30]);
    bus.memory[0x3000] = 0xD0;
    cpu.regs.set_flag(Flag::C, true);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.pc(), 0x3000);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.pc(), 0x3001);
}

#[test]
fn call_and_ret_use_the_stack() {
    let mut cpu = cpu_at(0x0000);
    cpu.regs.sp = 0xFFFE;
    let mut bus = TestBus::with_program(0x0000, &[0xCD, 0x34, 0x12]);
    bus.memory[0x1234] = 0xC9;

    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.sp(), 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x00);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.sp(), 0xFFFE);
}

#[test]
fn rst_pushes_return_and_jumps_to_vector() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0xEF]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.pc(), 0x0028);
    assert_eq!(bus.memory[0xCFFE], 0x01);
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    let mut cpu = cpu_at(0x0000);
    // RLCA ; RLA
    let mut bus = TestBus::with_program(0x0000, &[0x07, 0x17]);
    cpu.regs.a = 0x80;
    cpu.regs.set_flag(Flag::Z, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(flags(&cpu), (false, false, false, true));

    cpu.regs.a = 0x00;
    cpu.regs.set_flag(Flag::C, false);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (false, false, false, false));
}

#[test]
fn cb_shifts_set_zero_and_carry() {
    let mut cpu = cpu_at(0x0000);
    // RL C ; SWAP A ; SRA B
    let mut bus = TestBus::with_program(0x0000, &[0xCB, 0x11, 0xCB, 0x37, 0xCB, 0x28]);
    cpu.regs.c = 0x80;
    cpu.regs.a = 0xF1;
    cpu.regs.b = 0x81;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(flags(&cpu), (true, false, false, true));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x1F);
    assert_eq!(flags(&cpu), (false, false, false, false));

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0xC0);
    assert_eq!(flags(&cpu), (false, false, false, true));
}

#[test]
fn cb_bit_res_set_on_hl_indirect() {
    let mut cpu = cpu_at(0x0000);
    // BIT 0, (HL) ; SET 7, (HL) ; RES 1, (HL)
    let mut bus = TestBus::with_program(0x0000, &[0xCB, 0x46, 0xCB, 0xFE, 0xCB, 0x8E]);
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x02;
    cpu.regs.set_flag(Flag::C, true);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(flags(&cpu), (true, false, true, true));
    assert_eq!(bus.memory[0xC000], 0x02);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(bus.memory[0xC000], 0x82);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(bus.memory[0xC000], 0x80);
}

#[test]
fn illegal_opcodes_are_fatal() {
    for opcode in [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ] {
        let mut cpu = cpu_at(0x0200);
        let mut bus = TestBus::with_program(0x0200, &[opcode]);

        assert_eq!(
            cpu.step(&mut bus),
            Err(Error::IllegalOpcode { opcode, pc: 0x0200 })
        );
    }
}

#[test]
fn interrupt_entry_pushes_pc_and_jumps_to_vector() {
    let mut cpu = cpu_at(0x1234);
    let mut bus = TestBus::default();
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x06;

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.pc(), 0x0048);
    assert_eq!(cpu.sp(), 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x34);
    assert_eq!(bus.memory[0xCFFF], 0x12);
    assert_eq!(bus.memory[0xFF0F], 0x04);
    assert!(!cpu.ime);
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    let mut cpu = cpu_at(0x0000);
    // EI ; NOP ; NOP
    let mut bus = TestBus::with_program(0x0000, &[0xFB, 0x00, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime);
    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime);
    assert_eq!(cpu.pc(), 0x0002);

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.pc(), 0x0040);
    assert_eq!(bus.memory[0xCFFE], 0x02);
}

#[test]
fn halt_wakes_on_pending_interrupt_without_ime() {
    let mut cpu = cpu_at(0x0000);
    // HALT ; INC A
    let mut bus = TestBus::with_program(0x0000, &[0x76, 0x3C]);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.halted);
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.pc(), 0x0001);

    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.pc(), 0x0002);
}

#[test]
fn stop_consumes_padding_byte() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x10, 0x00]);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.pc(), 0x0002);
    assert!(cpu.halted);
}

#[test]
fn flag_register_low_nibble_stays_clear() {
    let mut regs = Registers::default();
    regs.set_f(0xFF);
    assert_eq!(regs.f(), 0xF0);
    regs.set_af(0x12FF);
    assert_eq!(regs.af(), 0x12F0);
    regs.set_flag(Flag::C, false);
    assert_eq!(regs.f(), 0xE0);
}
