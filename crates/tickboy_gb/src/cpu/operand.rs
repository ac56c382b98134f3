//! Operand fields packed into opcode bits.

/// 8-bit operand selected by a 3-bit register field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Operand8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlIndirect,
    A,
}

impl Operand8 {
    const TABLE: [Operand8; 8] = [
        Operand8::B,
        Operand8::C,
        Operand8::D,
        Operand8::E,
        Operand8::H,
        Operand8::L,
        Operand8::HlIndirect,
        Operand8::A,
    ];

    /// Decode the register field starting at bit `shift` of `opcode`.
    #[inline]
    pub(super) fn decode(opcode: u8, shift: u32) -> Self {
        Self::TABLE[usize::from((opcode >> shift) & 0x07)]
    }

    #[inline]
    pub(super) fn is_memory(self) -> bool {
        self == Operand8::HlIndirect
    }
}

/// 16-bit register pair in the `rr` field of loads and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Reg16 {
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    const TABLE: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];

    #[inline]
    pub(super) fn decode(opcode: u8) -> Self {
        Self::TABLE[usize::from((opcode >> 4) & 0x03)]
    }
}

/// 16-bit register pair in the `rr` field of PUSH/POP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Reg16Stack {
    BC,
    DE,
    HL,
    AF,
}

impl Reg16Stack {
    const TABLE: [Reg16Stack; 4] = [
        Reg16Stack::BC,
        Reg16Stack::DE,
        Reg16Stack::HL,
        Reg16Stack::AF,
    ];

    #[inline]
    pub(super) fn decode(opcode: u8) -> Self {
        Self::TABLE[usize::from((opcode >> 4) & 0x03)]
    }
}

/// Branch condition in bits 3-4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    const TABLE: [Condition; 4] = [Condition::NZ, Condition::Z, Condition::NC, Condition::C];

    #[inline]
    pub(super) fn decode(opcode: u8) -> Self {
        Self::TABLE[usize::from((opcode >> 3) & 0x03)]
    }
}

/// Sign-extend an 8-bit two's complement displacement.
#[inline]
pub(super) fn sign_extend(byte: u8) -> i16 {
    i16::from(byte ^ 0x80) - 0x80
}
