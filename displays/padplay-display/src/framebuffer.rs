//! Off-screen frame buffer
//!
//! A 128x64 one-bit bitmap organised as 8 pages of 128 column bytes, the
//! native memory layout of SSD1306-class controllers. Bit 0 of a column byte
//! is the top pixel row of its page.
//!
//! Every drawing call clips at the panel edge, so callers may pass
//! coordinates that are partially or entirely off-screen.

use embedded_graphics::mono_font::iso_8859_1::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Glyph advance of the text font
pub const CHAR_WIDTH: i32 = 6;

/// Line height of the text font
pub const CHAR_HEIGHT: i32 = 10;

/// Monochrome frame buffer
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a blank (all pixels off) frame buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Fill the entire buffer with one value
    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(byte);
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(false);
    }

    /// Set a single pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        let Some((col, page, mask)) = locate(x, y) else {
            return;
        };
        if on {
            self.pages[page][col] |= mask;
        } else {
            self.pages[page][col] &= !mask;
        }
    }

    /// Read a single pixel; off-screen pixels read as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match locate(x, y) {
            Some((col, page, mask)) => self.pages[page][col] & mask != 0,
            None => false,
        }
    }

    /// Fill an axis-aligned rectangle
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, on: bool) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(WIDTH as i32);
        let y1 = (y + height).min(HEIGHT as i32);

        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, on);
            }
        }
    }

    /// Draw a vertical line of `length` pixels starting at (x, y)
    pub fn vline(&mut self, x: i32, y: i32, length: i32, on: bool) {
        self.fill_rect(x, y, 1, length, on);
    }

    /// Draw a horizontal line of `length` pixels starting at (x, y)
    pub fn hline(&mut self, x: i32, y: i32, length: i32, on: bool) {
        self.fill_rect(x, y, length, 1, on);
    }

    /// Draw text with its top-left corner at (x, y)
    ///
    /// Uses a 6x10 Latin-1 font, so keycap glyphs such as `÷` print as
    /// themselves; anything outside Latin-1 renders as `?`.
    pub fn text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }

    /// Raw column bytes of one page, `None` past the last page
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    /// Number of lit pixels (used by tests and diagnostics)
    pub fn lit_pixels(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }
}

/// Map a coordinate to (column, page, bit mask)
#[inline]
fn locate(x: i32, y: i32) -> Option<(usize, usize, u8)> {
    if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    Some((x, y / 8, 1 << (y % 8)))
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FrameBuffer[{} lit]", self.lit_pixels());
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FrameBuffer[{} lit]", self.lit_pixels())
    }
}
