//! Display node runtime state

use crate::ticks::{ticks_diff, Interval};

/// State owned and mutated only by the display node's loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayState {
    /// Last temperature received, 0.0 until the first datagram
    pub current_temperature: f64,
    /// Tick of the last accepted reading
    pub last_receive: Option<u32>,
    /// Scheduled redraw timer
    pub render: Interval,
    /// Diagnostic dump timer
    pub dump: Interval,
    /// Whether the last render left the unit glyph out
    pub unit_hidden: bool,
}

impl DisplayState {
    /// Fresh state with both timers starting at `now`
    pub const fn new(now: u32, redraw_ms: u32, dump_ms: u32) -> Self {
        Self {
            current_temperature: 0.0,
            last_receive: None,
            render: Interval::new(redraw_ms, now),
            dump: Interval::new(dump_ms, now),
            unit_hidden: false,
        }
    }

    /// Store a newly received reading
    pub fn apply_reading(&mut self, temperature: f64, now: u32) {
        self.current_temperature = temperature;
        self.last_receive = Some(now);
    }

    /// Check if a receive happened less than `window_ms` ago
    pub fn within_receive_window(&self, now: u32, window_ms: u32) -> bool {
        match self.last_receive {
            Some(at) => {
                let elapsed = ticks_diff(now, at);
                elapsed >= 0 && elapsed < window_ms as i32
            }
            None => false,
        }
    }

    /// Record a completed render
    pub fn mark_rendered(&mut self, now: u32, unit_hidden: bool) {
        self.render.mark(now);
        self.unit_hidden = unit_hidden;
    }

    /// Check if the scheduled redraw interval has elapsed
    pub fn render_due(&self, now: u32) -> bool {
        self.render.is_due(now)
    }

    /// Check if the receive indicator should be cleared by a redraw
    pub fn indicator_expired(&self, now: u32, window_ms: u32) -> bool {
        self.unit_hidden && !self.within_receive_window(now, window_ms)
    }
}
