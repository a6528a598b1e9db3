//! Page-organized monochrome framebuffer
//!
//! Pixels are stored the way the panel consumes them: one byte covers an
//! 8-pixel vertical strip of a page, bit 0 at the top. Byte `1 + page * width
//! + x` holds column `x` of `page`. Byte 0 is the data-write control byte,
//! so a whole frame goes to the panel in a single transfer.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{OriginDimensions, Size},
    draw_target::DrawTarget,
    Pixel,
};

use crate::error::InvalidDimensions;
use crate::font::{self, GLYPH_SIZE};

/// Widest supported panel
pub const MAX_WIDTH: usize = 128;
/// Tallest supported panel
pub const MAX_HEIGHT: usize = 64;
/// Rows per page
pub const PAGE_HEIGHT: usize = 8;
/// Control byte that marks the rest of a transfer as display data
pub const DATA_CONTROL: u8 = 0x40;

const BUFFER_LEN: usize = 1 + MAX_WIDTH * MAX_HEIGHT / PAGE_HEIGHT;

/// 1-bit framebuffer for panels up to 128×64
#[derive(Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    buffer: [u8; BUFFER_LEN],
}

impl Framebuffer {
    /// Create a cleared framebuffer
    pub fn new(width: u16, height: u16) -> Result<Self, InvalidDimensions> {
        let (w, h) = (width as usize, height as usize);
        if w == 0 || w > MAX_WIDTH || h == 0 || h > MAX_HEIGHT || h % PAGE_HEIGHT != 0 {
            return Err(InvalidDimensions { width, height });
        }

        let mut buffer = [0u8; BUFFER_LEN];
        buffer[0] = DATA_CONTROL;
        Ok(Self {
            width: w,
            height: h,
            buffer,
        })
    }

    pub fn width(&self) -> u16 {
        self.width as u16
    }

    pub fn height(&self) -> u16 {
        self.height as u16
    }

    /// Number of 8-pixel pages
    pub fn pages(&self) -> usize {
        self.height / PAGE_HEIGHT
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let index = 1 + (y / PAGE_HEIGHT) * self.width + x;
        Some((index, 1 << (y % PAGE_HEIGHT)))
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: BinaryColor) {
        let value = if color.is_on() { 0xFF } else { 0x00 };
        self.data_mut().fill(value);
    }

    /// Set one pixel; coordinates outside the panel are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if let Some((index, mask)) = self.index(x, y) {
            if color.is_on() {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Read one pixel, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        self.index(x, y)
            .map(|(index, mask)| BinaryColor::from(self.buffer[index] & mask != 0))
    }

    /// Fill a rectangle, clipped to the panel
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: BinaryColor) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_pixel(xx, yy, color);
            }
        }
    }

    /// Shift the contents by `dx`, `dy` pixels
    ///
    /// Pixels whose source lies outside the panel keep their old value, so
    /// the vacated band still shows what was there before.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let source = self.clone();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if let Some(color) = source.pixel(x - dx, y - dy) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw text in the native 8×8 font with its top-left corner at `x`, `y`
    ///
    /// Only glyph pixels are written; the background is left untouched.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: BinaryColor) {
        let mut origin = x;
        for c in text.chars() {
            for gy in 0..GLYPH_SIZE {
                for gx in 0..GLYPH_SIZE {
                    if font::glyph_pixel(c, gx, gy) {
                        self.set_pixel(origin + gx as i32, y + gy as i32, color);
                    }
                }
            }
            origin = origin.saturating_add(GLYPH_SIZE as i32);
        }
    }

    /// Pixel data without the control byte
    pub fn data(&self) -> &[u8] {
        &self.buffer[1..1 + self.width * self.pages()]
    }

    fn data_mut(&mut self) -> &mut [u8] {
        let len = self.width * self.pages();
        &mut self.buffer[1..1 + len]
    }

    /// One page of pixel data
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        if page >= self.pages() {
            return None;
        }
        let start = page * self.width;
        Some(&self.data()[start..start + self.width])
    }

    /// Whole frame ready for the panel, control byte first
    pub fn transfer(&mut self) -> &[u8] {
        self.buffer[0] = DATA_CONTROL;
        let len = 1 + self.width * self.pages();
        &self.buffer[..len]
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::{Point, Primitive},
        primitives::{PrimitiveStyle, Rectangle},
        Drawable,
    };
    use proptest::prelude::*;

    const ON: BinaryColor = BinaryColor::On;
    const OFF: BinaryColor = BinaryColor::Off;

    fn panel() -> Framebuffer {
        Framebuffer::new(128, 64).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let fb = panel();
        assert_eq!(fb.width(), 128);
        assert_eq!(fb.height(), 64);
        assert_eq!(fb.pages(), 8);
        assert_eq!(fb.data().len(), 1024);

        let small = Framebuffer::new(64, 32).unwrap();
        assert_eq!(small.pages(), 4);
        assert_eq!(small.data().len(), 256);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(129, 64).is_err());
        assert!(Framebuffer::new(128, 72).is_err());
        assert!(Framebuffer::new(128, 60).is_err());
        assert_eq!(
            Framebuffer::new(0, 8).err(),
            Some(InvalidDimensions { width: 0, height: 8 })
        );
    }

    #[test]
    fn test_page_major_layout() {
        let mut fb = panel();
        fb.set_pixel(0, 0, ON);
        fb.set_pixel(5, 9, ON);
        fb.set_pixel(127, 63, ON);

        assert_eq!(fb.data()[0], 0x01);
        // Page 1, column 5, bit 1
        assert_eq!(fb.data()[128 + 5], 0x02);
        assert_eq!(fb.data()[1023], 0x80);
    }

    #[test]
    fn test_set_and_clear_pixel() {
        let mut fb = panel();
        fb.set_pixel(10, 10, ON);
        assert_eq!(fb.pixel(10, 10), Some(ON));
        fb.set_pixel(10, 10, OFF);
        assert_eq!(fb.pixel(10, 10), Some(OFF));
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut fb = panel();
        fb.set_pixel(-1, 0, ON);
        fb.set_pixel(0, -1, ON);
        fb.set_pixel(128, 0, ON);
        fb.set_pixel(0, 64, ON);
        assert!(fb.data().iter().all(|&b| b == 0));
        assert_eq!(fb.pixel(128, 0), None);
    }

    #[test]
    fn test_fill() {
        let mut fb = panel();
        fb.fill(ON);
        assert!(fb.data().iter().all(|&b| b == 0xFF));
        fb.fill(OFF);
        assert!(fb.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = panel();
        fb.fill_rect(-2, -2, 4, 4, ON);
        assert_eq!(fb.pixel(0, 0), Some(ON));
        assert_eq!(fb.pixel(1, 1), Some(ON));
        assert_eq!(fb.pixel(2, 2), Some(OFF));

        fb.fill_rect(10, 10, 0, 5, ON);
        assert_eq!(fb.pixel(10, 10), Some(OFF));
    }

    #[test]
    fn test_scroll_moves_content() {
        let mut fb = panel();
        fb.set_pixel(10, 20, ON);
        fb.scroll(3, -4);
        assert_eq!(fb.pixel(13, 16), Some(ON));
    }

    #[test]
    fn test_scroll_leaves_vacated_area() {
        let mut fb = panel();
        fb.set_pixel(0, 0, ON);
        fb.scroll(2, 0);
        // Source column 0 copied to column 2, columns 0 and 1 keep old values
        assert_eq!(fb.pixel(2, 0), Some(ON));
        assert_eq!(fb.pixel(0, 0), Some(ON));
        assert_eq!(fb.pixel(1, 0), Some(OFF));
    }

    #[test]
    fn test_draw_text_only_sets_glyph_pixels() {
        let mut fb = panel();
        fb.fill(ON);
        fb.draw_text(".", 0, 0, OFF);
        assert_eq!(fb.pixel(2, 5), Some(OFF));
        assert_eq!(fb.pixel(3, 6), Some(OFF));
        assert_eq!(fb.pixel(0, 0), Some(ON));
    }

    #[test]
    fn test_draw_text_advances_eight_pixels() {
        let mut fb = panel();
        fb.draw_text("..", 4, 8, ON);
        assert_eq!(fb.pixel(6, 13), Some(ON));
        assert_eq!(fb.pixel(14, 13), Some(ON));
        assert_eq!(fb.pixel(10, 13), Some(OFF));
    }

    #[test]
    fn test_transfer_restores_control_byte() {
        let mut fb = panel();
        fb.buffer[0] = 0x00;
        let frame = fb.transfer();
        assert_eq!(frame.len(), 1025);
        assert_eq!(frame[0], DATA_CONTROL);
    }

    #[test]
    fn test_page_access() {
        let mut fb = panel();
        fb.set_pixel(3, 63, ON);
        assert_eq!(fb.page(7).map(|p| p[3]), Some(0x80));
        assert_eq!(fb.page(8), None);
    }

    #[test]
    fn test_draw_target() {
        let mut fb = panel();
        Rectangle::new(Point::new(120, 60), embedded_graphics::prelude::Size::new(16, 16))
            .into_styled(PrimitiveStyle::with_fill(ON))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(127, 63), Some(ON));
        assert_eq!(fb.pixel(119, 63), Some(OFF));
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_writes_ignored(x in -500i32..500, y in -500i32..500) {
            prop_assume!(!(0..128).contains(&x) || !(0..64).contains(&y));
            let mut fb = panel();
            fb.set_pixel(x, y, ON);
            prop_assert!(fb.data().iter().all(|&b| b == 0));
        }
    }
}
