//! Node phase machines
//!
//! The sensor node walks a fixed startup sequence before it starts
//! sampling. A fault during startup halts it for good; once sampling, no
//! event leaves the loop.

use super::events::{ReceiverEvent, SenderEvent};

/// Sensor node phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenderPhase {
    /// Probing candidate bus addresses
    #[default]
    Discover,
    /// Reading the calibration block
    Calibrate,
    /// Writing measurement configuration
    Configure,
    /// Sampling and transmitting forever
    Sampling,
    /// Startup failed; the node never samples
    Halted(HaltReason),
}

/// Why the sensor node stopped during startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HaltReason {
    /// No supported chip at any candidate address
    SensorNotFound,
    /// Calibration block could not be read
    CalibrationFailed,
}

impl SenderPhase {
    /// Process an event and return the new phase
    pub fn transition(self, event: SenderEvent) -> SenderPhase {
        match (self, event) {
            (SenderPhase::Halted(_), _) => self,
            (SenderPhase::Sampling, _) => self,

            (_, SenderEvent::Fault(reason)) => SenderPhase::Halted(reason),

            (SenderPhase::Discover, SenderEvent::SensorFound) => SenderPhase::Calibrate,
            (SenderPhase::Calibrate, SenderEvent::CalibrationLoaded) => SenderPhase::Configure,
            (SenderPhase::Configure, SenderEvent::Configured) => SenderPhase::Sampling,

            _ => self,
        }
    }

    /// Check if the node has reached its sampling loop
    pub fn is_sampling(&self) -> bool {
        matches!(self, SenderPhase::Sampling)
    }

    /// Check if startup failed
    pub fn is_halted(&self) -> bool {
        matches!(self, SenderPhase::Halted(_))
    }
}

/// Display node phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverPhase {
    /// Bringing up panel and radio
    #[default]
    Init,
    /// Polling the radio and redrawing
    Running,
}

impl ReceiverPhase {
    pub fn transition(self, event: ReceiverEvent) -> ReceiverPhase {
        match (self, event) {
            (ReceiverPhase::Init, ReceiverEvent::Ready) => ReceiverPhase::Running,
            _ => self,
        }
    }
}
