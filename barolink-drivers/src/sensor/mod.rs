//! Barometric sensor drivers

pub mod bmp280;
pub mod calibration;

pub use bmp280::{Bmp280, ConfigureOutcome, ConfigureReport};
pub use calibration::{le_i16, le_u16, CalibrationTable};

use barolink_core::config::SensorRegisters;
use barolink_core::traits::SensorError;
use barolink_hal::I2cBus;

/// Result of a successful discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Discovery {
    /// Bus address that answered
    pub address: u8,
    /// Identity code read from the chip-id register
    pub chip_id: u8,
}

/// Check the candidate addresses for a supported chip
///
/// A failed bus transaction at an address means "not present there" and the
/// next candidate is tried. Returns the first address whose identity code is
/// recognized. When nothing is recognized, reports the last unrecognized
/// code seen, or [`SensorError::NotFound`] if no address answered at all.
pub fn discover<B: I2cBus>(
    bus: &mut B,
    regs: &SensorRegisters,
) -> Result<Discovery, SensorError<B::Error>> {
    let mut unknown = None;
    for &address in regs.candidate_addresses.iter() {
        match bus.read_register(address, regs.chip_id) {
            Ok(id) if regs.is_known_chip(id) => {
                return Ok(Discovery {
                    address,
                    chip_id: id,
                })
            }
            Ok(id) => unknown = Some(id),
            Err(_) => {}
        }
    }
    Err(unknown.map_or(SensorError::NotFound, SensorError::UnknownChip))
}


#[cfg(test)]
mod tests {
    use super::mock::MockBus;
    use super::*;

    #[test]
    fn test_discover_first_address() {
        let mut bus = MockBus::new().with_device(0x76);
        bus.set(0x76, 0xD0, &[0x58]);

        let found = discover(&mut bus, &SensorRegisters::default());
        assert_eq!(
            found,
            Ok(Discovery {
                address: 0x76,
                chip_id: 0x58
            })
        );
    }

    #[test]
    fn test_discover_falls_through_to_second_address() {
        let mut bus = MockBus::new().with_device(0x77);
        bus.set(0x77, 0xD0, &[0x60]);

        let found = discover(&mut bus, &SensorRegisters::default()).unwrap();
        assert_eq!(found.address, 0x77);
        assert_eq!(found.chip_id, 0x60);
    }

    #[test]
    fn test_discover_skips_unknown_chip() {
        let mut bus = MockBus::new().with_device(0x76).with_device(0x77);
        bus.set(0x76, 0xD0, &[0x55]);
        bus.set(0x77, 0xD0, &[0x58]);

        let found = discover(&mut bus, &SensorRegisters::default());
        assert_eq!(found.map(|d| d.address), Ok(0x77));
    }

    #[test]
    fn test_discover_reports_unknown_chip() {
        let mut bus = MockBus::new().with_device(0x77);
        bus.set(0x77, 0xD0, &[0x55]);

        assert_eq!(
            discover(&mut bus, &SensorRegisters::default()),
            Err(SensorError::UnknownChip(0x55))
        );
    }

    #[test]
    fn test_discover_none() {
        let mut bus = MockBus::new();
        assert_eq!(
            discover(&mut bus, &SensorRegisters::default()),
            Err(SensorError::NotFound)
        );

        let mut bus = MockBus::new().with_device(0x76);
        bus.fail_reads = true;
        assert_eq!(
            discover(&mut bus, &SensorRegisters::default()),
            Err(SensorError::NotFound)
        );
    }
}
