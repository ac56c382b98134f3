pub mod app;

/// An opaque RGB color as written into a framebuffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new_rgb(0xFF, 0xFF, 0xFF);
    pub const LIGHT_GRAY: Color = Color::new_rgb(0xAA, 0xAA, 0xAA);
    pub const DARK_GRAY: Color = Color::new_rgb(0x55, 0x55, 0x55);
    pub const BLACK: Color = Color::new_rgb(0x00, 0x00, 0x00);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Store this color into the first three bytes of `pixel`.
    #[inline]
    pub fn write_rgb(&self, pixel: &mut [u8]) {
        pixel[0] = self.r;
        pixel[1] = self.g;
        pixel[2] = self.b;
    }
}
