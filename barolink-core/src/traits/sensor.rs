//! Barometric sensor traits and reading types

/// Errors that can occur while talking to a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// Bus transaction failed
    Bus(E),
    /// No supported chip at any candidate address
    NotFound,
    /// Identity register returned an unrecognized code
    UnknownChip(u8),
}

impl<E> From<E> for SensorError<E> {
    fn from(e: E) -> Self {
        SensorError::Bus(e)
    }
}

/// Uncompensated ADC counts (20 bits each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub raw_temperature: u32,
    pub raw_pressure: u32,
}

impl RawSample {
    /// Assemble a 20-bit count from `msb`, `lsb` and the upper nibble of `xlsb`
    pub const fn assemble(msb: u8, lsb: u8, xlsb: u8) -> u32 {
        ((msb as u32) << 12) | ((lsb as u32) << 4) | ((xlsb as u32) >> 4)
    }

    /// Decode the 6-byte data block, pressure first
    pub const fn from_data_block(d: &[u8; 6]) -> Self {
        Self {
            raw_pressure: Self::assemble(d[0], d[1], d[2]),
            raw_temperature: Self::assemble(d[3], d[4], d[5]),
        }
    }
}

/// Compensated reading in physical units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Degrees Celsius
    pub temperature_c: f64,
    /// Pascal; 0.0 when the calibration makes the pressure branch undefined
    pub pressure_pa: f64,
}

/// Trait for barometric sensors
///
/// Implementations own the bus handle and calibration for one session.
pub trait BarometricSensor {
    /// Bus error type
    type Error;

    /// Read one raw sample, waiting out a measurement in progress
    fn read_raw(&mut self) -> Result<RawSample, SensorError<Self::Error>>;

    /// Convert a raw sample using the session's calibration
    fn compensate(&self, raw: RawSample) -> Reading;

    /// Read and compensate in one step
    fn read(&mut self) -> Result<Reading, SensorError<Self::Error>> {
        let raw = self.read_raw()?;
        Ok(self.compensate(raw))
    }
}
