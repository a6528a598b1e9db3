//! Node errors

use barolink_core::traits::SensorError;
use barolink_display::DisplayError;
use barolink_protocol::{LinkError, PayloadError};

/// Failure that stops a node before it reaches its loop
///
/// `E` is the sensor bus or panel transport error, `R` the radio error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError<E, R> {
    /// No supported sensor at any candidate address
    Discovery(SensorError<E>),
    /// Calibration block could not be read
    Calibration(SensorError<E>),
    /// Panel bring-up failed
    Display(DisplayError<E>),
    /// Radio could not be brought up
    Link(LinkError<R>),
}

/// Failure of one sample cycle; the loop logs it and carries on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError<E> {
    /// Reading the sensor failed
    Sensor(SensorError<E>),
    /// Reading could not be formatted into a payload
    Payload(PayloadError),
}

impl<E> From<SensorError<E>> for SampleError<E> {
    fn from(e: SensorError<E>) -> Self {
        SampleError::Sensor(e)
    }
}

impl<E> From<PayloadError> for SampleError<E> {
    fn from(e: PayloadError) -> Self {
        SampleError::Payload(e)
    }
}

impl<E, R> From<DisplayError<E>> for StartupError<E, R> {
    fn from(e: DisplayError<E>) -> Self {
        StartupError::Display(e)
    }
}

impl<E, R> From<LinkError<R>> for StartupError<E, R> {
    fn from(e: LinkError<R>) -> Self {
        StartupError::Link(e)
    }
}
