//! Sensor register map
//!
//! Register offsets, identity codes and the ordered configuration writes for
//! BMP280-family barometric sensors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of configuration registers written at startup
pub const CONFIG_WRITES: usize = 3;

/// Length of the calibration coefficient block in bytes
pub const CALIBRATION_LEN: usize = 24;

/// Length of the raw pressure + temperature data block in bytes
pub const DATA_LEN: usize = 6;

/// Single register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterWrite {
    pub register: u8,
    pub value: u8,
}

impl RegisterWrite {
    pub const fn new(register: u8, value: u8) -> Self {
        Self { register, value }
    }
}

/// Register map and startup configuration for the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorRegisters {
    /// Bus addresses tried in order during discovery
    pub candidate_addresses: [u8; 2],
    /// Identity register
    pub chip_id: u8,
    /// Recognized identity codes (BMP280, BME280)
    pub known_chip_ids: [u8; 2],
    /// Start of the calibration block
    pub calibration_base: u8,
    /// Status register
    pub status: u8,
    /// "Measurement in progress" bit of the status register
    pub busy_mask: u8,
    /// Wait applied when the busy bit is set
    pub busy_wait_ms: u32,
    /// Start of the pressure/temperature data block
    pub data_base: u8,
    /// Configuration writes, applied in order
    pub config_writes: [RegisterWrite; CONFIG_WRITES],
}

impl SensorRegisters {
    /// Humidity oversampling control
    pub const CTRL_HUM: u8 = 0xF2;
    /// Temperature/pressure oversampling and mode
    pub const CTRL_MEAS: u8 = 0xF4;
    /// Standby, filter and SPI settings
    pub const CONFIG: u8 = 0xF5;

    /// Register map of the BMP280 / BME280
    pub const fn bmp280() -> Self {
        Self {
            candidate_addresses: [0x76, 0x77],
            chip_id: 0xD0,
            known_chip_ids: [0x58, 0x60],
            calibration_base: 0x88,
            status: 0xF3,
            busy_mask: 0x08,
            busy_wait_ms: 10,
            data_base: 0xF7,
            config_writes: [
                // Humidity x1
                RegisterWrite::new(Self::CTRL_HUM, 0x01),
                // Temperature x1, pressure x1, normal mode
                RegisterWrite::new(Self::CTRL_MEAS, 0x27),
                // 1000 ms standby, filter off
                RegisterWrite::new(Self::CONFIG, 0xA0),
            ],
        }
    }

    /// Check whether an identity byte belongs to a supported chip
    pub fn is_known_chip(&self, id: u8) -> bool {
        self.known_chip_ids.contains(&id)
    }
}

impl Default for SensorRegisters {
    fn default() -> Self {
        Self::bmp280()
    }
}
