//! Events that trigger phase transitions

use super::machine::HaltReason;

/// Sensor node startup events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenderEvent {
    /// A supported chip answered at one of the candidate addresses
    SensorFound,
    /// Calibration block decoded
    CalibrationLoaded,
    /// Configuration writes issued (possibly with failures)
    Configured,
    /// Unrecoverable startup failure
    Fault(HaltReason),
}

/// Display node startup events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverEvent {
    /// Panel initialized and radio listening
    Ready,
}
