use tickboy_common::Color;

/// Grayscale shades selected by the two palette bits, lightest first.
const SHADES: [Color; 4] = [Color::WHITE, Color::LIGHT_GRAY, Color::DARK_GRAY, Color::BLACK];

/// Resolve a 2-bit color index through a DMG palette register.
#[inline]
pub(super) fn shade(palette: u8, color: u8) -> Color {
    let shift = (color & 0x03) * 2;
    SHADES[usize::from((palette >> shift) & 0x03)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_palette_maps_indices_in_order() {
        // 0xE4 = 0b11_10_01_00
        assert_eq!(shade(0xE4, 0), Color::WHITE);
        assert_eq!(shade(0xE4, 1), Color::LIGHT_GRAY);
        assert_eq!(shade(0xE4, 2), Color::DARK_GRAY);
        assert_eq!(shade(0xE4, 3), Color::BLACK);
    }

    #[test]
    fn inverted_palette_maps_index_zero_to_black() {
        assert_eq!(shade(0x1B, 0), Color::BLACK);
        assert_eq!(shade(0x1B, 3), Color::WHITE);
    }
}
