//! Auto-scaling layouts for a single reading
//!
//! Both strategies render the reading at the largest integer scale that
//! fits inside an inset rectangle and center it there. The value-plus-unit
//! strategy appends a unit glyph one scale step smaller, and can leave it
//! out to flag a fresh reading.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framebuffer::Framebuffer;
use crate::text::{measure_text, TextMeasure, MAX_TEXT_CHARS};

/// Largest scale the layouts try
pub const MAX_SCALE: u32 = 64;

/// How a reading is laid out on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutStrategy {
    /// The number alone, centered
    CenteredValue,
    /// The number followed by a smaller unit glyph
    ValuePlusUnit {
        unit: char,
        /// How long the unit stays hidden after a new reading arrives
        unit_hide_ms: u32,
    },
}

/// Layout settings for the display node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    pub strategy: LayoutStrategy,
    /// Horizontal margin on each side
    pub inset_x: i32,
    /// Vertical margin on each side
    pub inset_y: i32,
    /// Scheduled redraw period
    pub redraw_interval_ms: u32,
    /// Fraction digits shown
    pub decimals: u8,
}

impl LayoutConfig {
    /// Large number in the middle of the panel, redrawn every 10 s
    pub const fn centered_value() -> Self {
        Self {
            strategy: LayoutStrategy::CenteredValue,
            inset_x: 28,
            inset_y: 24,
            redraw_interval_ms: 10_000,
            decimals: 1,
        }
    }

    /// Number plus a `C` unit glyph that blinks off on receive
    pub const fn value_plus_unit() -> Self {
        Self {
            strategy: LayoutStrategy::ValuePlusUnit {
                unit: 'C',
                unit_hide_ms: 300,
            },
            inset_x: 4,
            inset_y: 4,
            redraw_interval_ms: 1000,
            decimals: 1,
        }
    }

    /// Receive-indicator window, 0 for strategies without one
    pub fn unit_hide_ms(&self) -> u32 {
        match self.strategy {
            LayoutStrategy::CenteredValue => 0,
            LayoutStrategy::ValuePlusUnit { unit_hide_ms, .. } => unit_hide_ms,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::centered_value()
    }
}

/// Where and how big the last render came out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rendered {
    pub scale: u32,
    /// Top-left of the number's visible box
    pub x: i32,
    pub y: i32,
    /// Width of everything placed, unit included
    pub width: i32,
    pub height: i32,
    /// Whether the unit glyph was drawn
    pub unit_drawn: bool,
    /// Whether the formatted value was cut to [`MAX_TEXT_CHARS`]
    pub truncated: bool,
}

/// Formatting sink that keeps the leading characters that fit
struct Clipped(String<MAX_TEXT_CHARS>);

impl Write for Clipped {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            self.0.push(c).map_err(|_| core::fmt::Error)?;
        }
        Ok(())
    }
}

/// Format `value` with `decimals` fraction digits, flagging overflow
fn format_value(value: f64, decimals: u8) -> (String<MAX_TEXT_CHARS>, bool) {
    let mut out = Clipped(String::new());
    let truncated = write!(out, "{:.*}", decimals as usize, value).is_err();
    (out.0, truncated)
}

/// Largest integer scale at which a `vis_w`×`vis_h` box fits the available
/// area, never below 1
pub fn select_scale(vis_w: i32, vis_h: i32, avail_w: i32, avail_h: i32) -> u32 {
    if vis_w <= 0 {
        return 1;
    }
    let by_height = (avail_h / vis_h.max(1)).max(1);
    let by_width = (avail_w / vis_w.max(1)).max(1);
    by_height.min(by_width).max(1) as u32
}

/// Offset that centers `size` inside `avail`, pinned to the start on overflow
fn center(inset: i32, avail: i32, size: i32) -> i32 {
    inset + ((avail - size) / 2).max(0)
}

/// Clear the framebuffer and draw `value` with the configured strategy
///
/// `unit_visible` only matters for [`LayoutStrategy::ValuePlusUnit`].
pub fn render_value(
    fb: &mut Framebuffer,
    config: &LayoutConfig,
    value: f64,
    unit_visible: bool,
) -> Rendered {
    fb.fill(BinaryColor::Off);

    let (text, truncated) = format_value(value, config.decimals);
    let number = measure_text(&text);

    let avail_w = fb.width() as i32 - 2 * config.inset_x;
    let avail_h = fb.height() as i32 - 2 * config.inset_y;

    let rendered = match config.strategy {
        LayoutStrategy::CenteredValue => render_centered(fb, config, &number, avail_w, avail_h),
        LayoutStrategy::ValuePlusUnit { unit, .. } => {
            let mut buf = [0u8; 4];
            let unit = measure_text(unit.encode_utf8(&mut buf));
            render_with_unit(fb, config, &number, &unit, avail_w, avail_h, unit_visible)
        }
    };
    Rendered {
        truncated,
        ..rendered
    }
}

fn render_centered(
    fb: &mut Framebuffer,
    config: &LayoutConfig,
    number: &TextMeasure,
    avail_w: i32,
    avail_h: i32,
) -> Rendered {
    let (vis_w, vis_h) = (number.bounds.width(), number.bounds.height());
    let scale = select_scale(vis_w, vis_h, avail_w, avail_h);
    let (w, h) = (vis_w * scale as i32, vis_h * scale as i32);
    let x = center(config.inset_x, avail_w, w);
    let y = center(config.inset_y, avail_h, h);

    if let Some(raster) = &number.raster {
        fb.draw_text_scaled(raster, &number.bounds, x, y, scale, BinaryColor::On);
    }
    Rendered {
        scale,
        x,
        y,
        width: w,
        height: h,
        unit_drawn: false,
        truncated: false,
    }
}

/// Total width of number plus spacing plus unit at `scale`
fn composite_width(number_w: i32, unit_w: i32, scale: i32) -> i32 {
    if unit_w == 0 {
        return number_w * scale;
    }
    let unit_scale = (scale - 1).max(1);
    number_w * scale + scale + unit_w * unit_scale
}

fn render_with_unit(
    fb: &mut Framebuffer,
    config: &LayoutConfig,
    number: &TextMeasure,
    unit: &TextMeasure,
    avail_w: i32,
    avail_h: i32,
    unit_visible: bool,
) -> Rendered {
    let (num_w, num_h) = (number.bounds.width(), number.bounds.height());
    let unit_w = unit.bounds.width();

    let fits = |s: i32| composite_width(num_w, unit_w, s) <= avail_w && num_h * s <= avail_h;
    let mut scale = 1;
    if num_w > 0 {
        while scale < MAX_SCALE as i32 && fits(scale + 1) {
            scale += 1;
        }
    }

    let width = composite_width(num_w, unit_w, scale);
    let height = num_h * scale;
    let x = center(config.inset_x, avail_w, width);
    let y = center(config.inset_y, avail_h, height);

    if let Some(raster) = &number.raster {
        fb.draw_text_scaled(raster, &number.bounds, x, y, scale as u32, BinaryColor::On);
    }

    let mut unit_drawn = false;
    if let (true, Some(raster)) = (unit_visible, &unit.raster) {
        let unit_scale = (scale - 1).max(1) as u32;
        let unit_x = x + num_w * scale + scale;
        fb.draw_text_scaled(raster, &unit.bounds, unit_x, y, unit_scale, BinaryColor::On);
        unit_drawn = true;
    }

    Rendered {
        scale: scale as u32,
        x,
        y,
        width,
        height,
        unit_drawn,
        truncated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ON: BinaryColor = BinaryColor::On;
    const OFF: BinaryColor = BinaryColor::Off;

    fn panel() -> Framebuffer {
        Framebuffer::new(128, 64).unwrap()
    }

    #[test]
    fn test_presets() {
        let centered = LayoutConfig::centered_value();
        assert_eq!((centered.inset_x, centered.inset_y), (28, 24));
        assert_eq!(centered.redraw_interval_ms, 10_000);
        assert_eq!(centered.unit_hide_ms(), 0);

        let unit = LayoutConfig::value_plus_unit();
        assert_eq!((unit.inset_x, unit.inset_y), (4, 4));
        assert_eq!(unit.redraw_interval_ms, 1000);
        assert_eq!(unit.unit_hide_ms(), 300);
    }

    #[test]
    fn test_select_scale() {
        assert_eq!(select_scale(30, 7, 72, 16), 2);
        assert_eq!(select_scale(30, 7, 120, 56), 4);
        assert_eq!(select_scale(0, 0, 72, 16), 1);
    }

    #[test]
    fn test_select_scale_floors_at_one() {
        assert_eq!(select_scale(200, 7, 72, 16), 1);
        assert_eq!(select_scale(30, 70, 72, 16), 1);
        assert_eq!(select_scale(30, 7, -10, -10), 1);
    }

    #[test]
    fn test_centered_value() {
        let mut fb = panel();
        let rendered = render_value(&mut fb, &LayoutConfig::centered_value(), 25.1, true);

        assert_eq!(rendered.scale, 2);
        assert_eq!((rendered.width, rendered.height), (60, 14));
        assert_eq!((rendered.x, rendered.y), (34, 25));
        assert!(!rendered.unit_drawn);

        // Top row of '2' is 0x1E: column 0 clear, column 1 set
        assert_eq!(fb.pixel(34, 25), Some(OFF));
        assert_eq!(fb.pixel(36, 25), Some(ON));
        assert_eq!(fb.pixel(37, 26), Some(ON));
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut fb = panel();
        fb.fill(ON);
        render_value(&mut fb, &LayoutConfig::centered_value(), 1.0, true);
        assert_eq!(fb.pixel(0, 0), Some(OFF));
        assert_eq!(fb.pixel(127, 63), Some(OFF));
    }

    #[test]
    fn test_value_plus_unit() {
        let mut fb = panel();
        let rendered = render_value(&mut fb, &LayoutConfig::value_plus_unit(), 25.1, true);

        // 30*3 + 3 + 7*2 = 107 fits in 120; scale 4 would need 145
        assert_eq!(rendered.scale, 3);
        assert_eq!(rendered.width, 107);
        assert_eq!(rendered.x, 4 + (120 - 107) / 2);
        assert!(rendered.unit_drawn);
        assert!(!rendered.truncated);

        // Top row of 'C' is 0x3C: columns 2..=5 at unit scale 2
        let unit_x = rendered.x + 30 * 3 + 3;
        assert_eq!(fb.pixel(unit_x + 4, rendered.y), Some(ON));
        assert_eq!(fb.pixel(unit_x, rendered.y), Some(OFF));
    }

    #[test]
    fn test_long_value_with_unit_floors_scale() {
        let mut fb = panel();
        let rendered = render_value(&mut fb, &LayoutConfig::value_plus_unit(), -12345.6, true);

        // 62 wide: scale 2 needs 124 + 2 + 7 = 133, over the 120 available
        let num_w = measure_text("-12345.6").bounds.width();
        assert_eq!(num_w, 62);
        assert_eq!(rendered.scale, 1);
        assert_eq!(rendered.width, num_w + 1 + 7);
        assert_eq!((rendered.x, rendered.y), (4 + (120 - 70) / 2, 4 + (56 - 7) / 2));
        assert!(rendered.unit_drawn);

        // Unit starts one scale step past the number
        let unit_x = rendered.x + num_w + 1;
        assert_eq!(fb.pixel(unit_x + 2, rendered.y), Some(ON));
        assert_eq!(fb.pixel(unit_x, rendered.y), Some(OFF));
        assert_eq!(fb.pixel(unit_x, rendered.y + 2), Some(ON));
        assert_eq!(fb.pixel(unit_x - 1, rendered.y + 2), Some(OFF));
    }

    #[test]
    fn test_format_value_flags_overflow() {
        let (text, truncated) = format_value(25.05, 1);
        assert_eq!(text.as_str(), "25.1");
        assert!(!truncated);

        let (text, truncated) = format_value(1.0e20, 1);
        assert_eq!(text.len(), MAX_TEXT_CHARS);
        assert!(text.starts_with("1000000000"));
        assert!(truncated);
    }

    #[test]
    fn test_oversized_value_is_reported_truncated() {
        let mut fb = panel();
        let rendered = render_value(&mut fb, &LayoutConfig::centered_value(), 1.0e20, true);
        assert!(rendered.truncated);
        assert_eq!(rendered.scale, 1);
    }

    #[test]
    fn test_hidden_unit_keeps_number_in_place() {
        let mut shown = panel();
        let with_unit = render_value(&mut shown, &LayoutConfig::value_plus_unit(), 25.1, true);

        let mut hidden = panel();
        let without_unit = render_value(&mut hidden, &LayoutConfig::value_plus_unit(), 25.1, false);

        assert_eq!((with_unit.x, with_unit.y), (without_unit.x, without_unit.y));
        assert!(!without_unit.unit_drawn);

        let unit_x = with_unit.x + 30 * 3 + 3;
        assert_eq!(hidden.pixel(unit_x + 4, with_unit.y), Some(OFF));
        assert_eq!(
            hidden.pixel(with_unit.x + 3, with_unit.y),
            shown.pixel(with_unit.x + 3, with_unit.y)
        );
    }

    #[test]
    fn test_negative_and_decimals() {
        let mut fb = panel();
        let config = LayoutConfig {
            decimals: 2,
            ..LayoutConfig::centered_value()
        };
        let rendered = render_value(&mut fb, &config, -12.345, true);
        assert_eq!(rendered.scale, 1);
    }

    proptest! {
        #[test]
        fn prop_scale_never_below_one(
            vis_w in -10i32..300,
            vis_h in -10i32..300,
            avail_w in -200i32..200,
            avail_h in -200i32..200,
        ) {
            prop_assert!(select_scale(vis_w, vis_h, avail_w, avail_h) >= 1);
        }

        #[test]
        fn prop_scaled_text_fits_when_possible(value in -99.9f64..999.9) {
            let mut fb = panel();
            let config = LayoutConfig::centered_value();
            let rendered = render_value(&mut fb, &config, value, true);
            if rendered.scale > 1 {
                prop_assert!(rendered.width <= 72);
                prop_assert!(rendered.height <= 16);
            }
        }
    }
}
