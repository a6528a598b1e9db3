//! Node timing configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensor node settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SenderConfig {
    /// Delay between sample cycles, also applied after a failed cycle
    pub sample_interval_ms: u32,
    /// Fraction digits in the transmitted payload
    pub decimals: u8,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            decimals: 2,
        }
    }
}

/// Display node settings
///
/// The redraw interval belongs to the layout strategy, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReceiverConfig {
    /// Sleep between loop passes
    pub poll_interval_ms: u32,
    /// Period of the framebuffer hex dump
    pub dump_interval_ms: u32,
    /// Emit the framebuffer hex dump at all
    pub dump_enabled: bool,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            dump_interval_ms: 5000,
            dump_enabled: true,
        }
    }
}
