//! Text measurement and integer scaling
//!
//! Text is first rendered at native size into a scratch raster. The tight
//! bounding box of its set pixels drives layout, and scaled drawing replays
//! only the pixels inside that box, so glyph padding never affects centering.

use embedded_graphics::pixelcolor::BinaryColor;

use crate::font::{self, GLYPH_SIZE};
use crate::framebuffer::{Framebuffer, MAX_HEIGHT};

/// Longest string the scratch raster holds; extra characters are dropped
pub const MAX_TEXT_CHARS: usize = 16;

/// Tight bounding box of set pixels, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl GlyphBounds {
    /// Sentinel for a render with no set pixels
    pub const EMPTY: GlyphBounds = GlyphBounds {
        min_x: 0,
        max_x: -1,
        min_y: 0,
        max_y: -1,
    };

    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Visible width in native pixels, 0 when empty
    pub fn width(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_x - self.min_x + 1
        }
    }

    /// Visible height in native pixels, 0 when empty
    pub fn height(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_y - self.min_y + 1
        }
    }
}

/// Native-size render of a short string, one bit per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchRaster {
    width: usize,
    rows: [u128; GLYPH_SIZE],
}

impl ScratchRaster {
    fn render(text: &str) -> Self {
        let mut rows = [0u128; GLYPH_SIZE];
        let mut width = 0;
        for (i, c) in text.chars().take(MAX_TEXT_CHARS).enumerate() {
            let glyph = font::glyph(c);
            for (row, bits) in rows.iter_mut().zip(glyph.iter()) {
                *row |= (*bits as u128) << (i * GLYPH_SIZE);
            }
            width += GLYPH_SIZE;
        }
        Self { width, rows }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        GLYPH_SIZE
    }

    /// Check one pixel; out-of-range coordinates read as unset
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= GLYPH_SIZE {
            return false;
        }
        self.rows[y as usize] & (1u128 << x) != 0
    }

    /// Scan every pixel for the tight bounding box
    fn bounds(&self) -> GlyphBounds {
        let mut bounds = GlyphBounds {
            min_x: self.width as i32,
            max_x: -1,
            min_y: GLYPH_SIZE as i32,
            max_y: -1,
        };
        for y in 0..GLYPH_SIZE as i32 {
            for x in 0..self.width as i32 {
                if self.get(x, y) {
                    bounds.min_x = bounds.min_x.min(x);
                    bounds.max_x = bounds.max_x.max(x);
                    bounds.min_y = bounds.min_y.min(y);
                    bounds.max_y = bounds.max_y.max(y);
                }
            }
        }
        if bounds.is_empty() {
            GlyphBounds::EMPTY
        } else {
            bounds
        }
    }
}

/// Result of [`measure_text`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMeasure {
    pub bounds: GlyphBounds,
    /// `None` when nothing was drawn
    pub raster: Option<ScratchRaster>,
}

impl TextMeasure {
    pub fn is_empty(&self) -> bool {
        self.raster.is_none()
    }
}

/// Measure the visible extent of `text` at native size
pub fn measure_text(text: &str) -> TextMeasure {
    let raster = ScratchRaster::render(text);
    let bounds = raster.bounds();
    if bounds.is_empty() {
        return TextMeasure {
            bounds,
            raster: None,
        };
    }
    TextMeasure {
        bounds,
        raster: Some(raster),
    }
}

/// Prefix of `text` that fits the scratch raster
fn measured_prefix(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl Framebuffer {
    /// Replay the pixels inside `bounds` as `scale`×`scale` blocks
    ///
    /// The box's top-left pixel lands at `x`, `y`. Blocks falling outside
    /// the panel are clipped. `scale` is clamped to `1..=MAX_HEIGHT`.
    /// Returns the scaled visible width and height.
    pub fn draw_text_scaled(
        &mut self,
        raster: &ScratchRaster,
        bounds: &GlyphBounds,
        x: i32,
        y: i32,
        scale: u32,
        color: BinaryColor,
    ) -> (i32, i32) {
        if bounds.is_empty() {
            return (0, 0);
        }
        let scale = scale.clamp(1, MAX_HEIGHT as u32) as i32;

        for yy in bounds.min_y..=bounds.max_y {
            for xx in bounds.min_x..=bounds.max_x {
                if !raster.get(xx, yy) {
                    continue;
                }
                let bx = x + (xx - bounds.min_x) * scale;
                let by = y + (yy - bounds.min_y) * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        self.set_pixel(bx + sx, by + sy, color);
                    }
                }
            }
        }
        (bounds.width() * scale, bounds.height() * scale)
    }

    /// Measure and draw `text` with the visible box's top-left at `x`, `y`
    ///
    /// `scale` is clamped to `max_scale` and to at least 1. Returns the
    /// scaled visible width, 0 for text with no visible pixels.
    pub fn text_scaled(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        scale: u32,
        max_scale: Option<u32>,
        color: BinaryColor,
    ) -> i32 {
        let scale = max_scale.map_or(scale, |max| scale.min(max)).max(1);
        let measure = measure_text(text);
        let Some(raster) = measure.raster else {
            return 0;
        };
        let bounds = measure.bounds;

        if scale == 1 {
            self.draw_text(measured_prefix(text), x - bounds.min_x, y - bounds.min_y, color);
            return bounds.width();
        }
        self.draw_text_scaled(&raster, &bounds, x, y, scale, color).0
    }
}
