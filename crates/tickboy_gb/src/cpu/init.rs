use super::{Cpu, Registers};

impl Cpu {
    /// A core in the state the boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::power_on();
        cpu.apply_post_boot_state();
        cpu
    }

    /// A core straight out of reset: all registers zero, PC at 0x0000.
    ///
    /// Used when a boot ROM image is mapped and will run first.
    pub fn power_on() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            wait_cycles: 0,
            cycles: 0,
        }
    }

    /// Reset the core. `boot_rom` selects between the reset state and the
    /// post-boot state.
    pub fn reset(&mut self, boot_rom: bool) {
        *self = Self::power_on();
        if !boot_rom {
            self.apply_post_boot_state();
        }
    }

    fn apply_post_boot_state(&mut self) {
        self.regs = Registers::POST_BOOT;
        // IME is clear when control reaches the cartridge.
        self.ime = false;
    }
}
