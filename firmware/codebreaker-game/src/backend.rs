//! Display backend trait
//!
//! The game draws through this trait so the same screens run on the SPI LCD
//! and on the host simulator. Pixel pushing, fonts and framebuffer handling
//! stay on the implementor's side.

/// RGB color, converted to RGB565 at the panel
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into the panel's 16-bit RGB565 pixel format
    pub const fn to_rgb565(&self) -> u16 {
        ((self.r as u16 & 0xF8) << 8) | ((self.g as u16 & 0xFC) << 3) | (self.b as u16 >> 3)
    }

    /// Unpack an RGB565 pixel, replicating the high bits into the low ones
    /// so full-scale channels come back as 255
    pub const fn from_rgb565(pixel: u16) -> Self {
        let r = (pixel >> 11) as u8 & 0x1F;
        let g = (pixel >> 5) as u8 & 0x3F;
        let b = pixel as u8 & 0x1F;
        Self::rgb(r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

/// Drawing surface used by the game screens
///
/// Coordinates are pixel offsets from the top-left corner. Implementations
/// clip anything that falls outside the panel.
pub trait DisplayBackend {
    /// Display width in pixels
    fn width(&self) -> u32;

    /// Display height in pixels
    fn height(&self) -> u32;

    /// Blank the whole display
    fn clear(&mut self);

    /// Draw `text` in the 8x8 font with its top-left corner at (x, y)
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, background: Option<Color>);

    /// Draw a one pixel rectangle outline
    fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);

    /// Fill a rectangle
    fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color);

    /// Push the finished screen to the panel
    fn refresh(&mut self) {}
}

impl<D: DisplayBackend + ?Sized> DisplayBackend for &mut D {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, background: Option<Color>) {
        (**self).draw_text(x, y, text, color, background)
    }

    fn draw_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        (**self).draw_rectangle(x, y, w, h, color)
    }

    fn fill_rectangle(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        (**self).fill_rectangle(x, y, w, h, color)
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }
}
