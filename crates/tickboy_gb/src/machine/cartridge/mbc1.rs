/// MBC1 register state.
///
/// ROM banking uses the 5-bit bank register plus the two high bits in
/// both banking modes; mode 1 additionally routes the high bits to the
/// RAM bank. Battery-backed persistence is not modelled.
pub(super) struct Mbc1 {
    rom_banks: usize,
    ram_banks: usize,
    rom_bank_low5: u8,
    bank_high2: u8,
    ram_enable: bool,
    banking_mode: u8,
}

impl Mbc1 {
    pub(super) fn new(rom_banks: usize, ram_banks: usize) -> Self {
        Self {
            rom_banks: rom_banks.max(2),
            ram_banks: ram_banks.max(1),
            rom_bank_low5: 1,
            bank_high2: 0,
            ram_enable: false,
            banking_mode: 0,
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => self.rom_bank_low5 = value & 0x1F,
            0x4000..=0x5FFF => self.bank_high2 = value & 0x03,
            _ => self.banking_mode = value & 0x01,
        }
    }

    #[inline]
    pub(super) fn ram_enabled(&self) -> bool {
        self.ram_enable
    }

    /// Bank seen at 0x4000-0x7FFF. Bank 0 cannot be selected there.
    pub(super) fn rom_bank(&self) -> usize {
        let low = usize::from(self.rom_bank_low5).max(1);
        let bank = (low | (usize::from(self.bank_high2) << 5)) % self.rom_banks;
        bank.max(1)
    }

    pub(super) fn ram_bank(&self) -> usize {
        if self.banking_mode == 1 {
            usize::from(self.bank_high2) % self.ram_banks
        } else {
            0
        }
    }
}
