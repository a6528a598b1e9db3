//! Monotonic tick source
//!
//! The nodes schedule work against a wrapping millisecond counter. Callers
//! must compare ticks with wraparound-safe subtraction (see
//! `barolink_core::ticks`), never with a plain `>`.

/// Monotonic millisecond counter that wraps at `u32::MAX`
pub trait TickSource {
    /// Current tick value in milliseconds
    fn now_ms(&self) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_ms(&self) -> u32 {
        T::now_ms(self)
    }
}

/// Tick source backed by the embassy-time monotonic clock
///
/// The 64-bit embassy instant is truncated to 32 bits, so the counter wraps
/// roughly every 49.7 days like any other tick source.
#[cfg(feature = "embassy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTicks;

#[cfg(feature = "embassy")]
impl TickSource for EmbassyTicks {
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
