//! BMP280 / BME280 driver
//!
//! One driver instance is one sensor session: it owns the bus handle, the
//! calibration read at open, and the delay used to wait out a conversion.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use barolink_core::config::{RegisterWrite, SensorRegisters, CALIBRATION_LEN, CONFIG_WRITES, DATA_LEN};
use barolink_core::traits::{BarometricSensor, RawSample, Reading, SensorError};
use barolink_hal::I2cBus;

use super::calibration::CalibrationTable;
use super::Discovery;

/// How the configuration writes went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigureOutcome {
    /// Every register write succeeded
    Applied,
    /// At least one write failed; the device keeps its previous setting
    /// for those registers
    ProceededWithDefaults,
}

/// Per-register record of the configuration writes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigureReport {
    /// Writes that failed, in the order they were attempted
    pub failed: Vec<RegisterWrite, CONFIG_WRITES>,
}

impl ConfigureReport {
    pub fn outcome(&self) -> ConfigureOutcome {
        if self.failed.is_empty() {
            ConfigureOutcome::Applied
        } else {
            ConfigureOutcome::ProceededWithDefaults
        }
    }
}

/// Read and decode the calibration block
pub fn read_calibration<B: I2cBus>(
    bus: &mut B,
    address: u8,
    regs: &SensorRegisters,
) -> Result<CalibrationTable, B::Error> {
    let mut block = [0u8; CALIBRATION_LEN];
    bus.read_registers(address, regs.calibration_base, &mut block)?;
    Ok(CalibrationTable::from_bytes(&block))
}

/// BMP280-family sensor on an I2C bus
pub struct Bmp280<B, D> {
    bus: B,
    delay: D,
    address: u8,
    chip_id: u8,
    regs: SensorRegisters,
    calibration: CalibrationTable,
}

impl<B: I2cBus, D: DelayNs> Bmp280<B, D> {
    /// Open a session on a discovered sensor
    ///
    /// Reads the calibration block; failure here leaves no usable session.
    pub fn open(
        mut bus: B,
        delay: D,
        discovery: Discovery,
        regs: SensorRegisters,
    ) -> Result<Self, SensorError<B::Error>> {
        let calibration = read_calibration(&mut bus, discovery.address, &regs)?;
        Ok(Self {
            bus,
            delay,
            address: discovery.address,
            chip_id: discovery.chip_id,
            regs,
            calibration,
        })
    }

    /// Write the measurement configuration
    ///
    /// Each register is written independently; a failed write is recorded
    /// in the report and the remaining writes still run.
    pub fn configure(&mut self) -> ConfigureReport {
        let mut report = ConfigureReport::default();
        for write in self.regs.config_writes {
            if self
                .bus
                .write_register(self.address, write.register, write.value)
                .is_err()
            {
                // Capacity equals the number of writes, so this cannot overflow
                let _ = report.failed.push(write);
            }
        }
        report
    }

    /// Read one raw sample
    ///
    /// If the status register reports a conversion in progress, waits the
    /// configured busy time once before reading the data block.
    pub fn read_raw(&mut self) -> Result<RawSample, SensorError<B::Error>> {
        let status = self.bus.read_register(self.address, self.regs.status)?;
        if status & self.regs.busy_mask != 0 {
            self.delay.delay_ms(self.regs.busy_wait_ms);
        }

        let mut data = [0u8; DATA_LEN];
        self.bus
            .read_registers(self.address, self.regs.data_base, &mut data)?;
        Ok(RawSample::from_data_block(&data))
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn chip_id(&self) -> u8 {
        self.chip_id
    }

    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    /// Release the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: I2cBus, D: DelayNs> BarometricSensor for Bmp280<B, D> {
    type Error = B::Error;

    fn read_raw(&mut self) -> Result<RawSample, SensorError<B::Error>> {
        Bmp280::read_raw(self)
    }

    fn compensate(&self, raw: RawSample) -> Reading {
        self.calibration.compensate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::super::calibration::tests::REFERENCE_BLOCK;
    use super::super::mock::{MockBus, MockError};
    use super::*;

    /// Delay that records requested waits instead of sleeping
    #[derive(Default)]
    struct RecordingDelay {
        waited_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.waited_ns += ns as u64;
        }
    }

    const FOUND: Discovery = Discovery {
        address: 0x76,
        chip_id: 0x58,
    };

    fn reference_bus() -> MockBus {
        let mut bus = MockBus::new().with_device(0x76);
        bus.set(0x76, 0xD0, &[0x58]);
        bus.set(0x76, 0x88, &REFERENCE_BLOCK);
        bus.set(0x76, 0xF7, &[101, 90, 192, 126, 237, 0]);
        bus
    }

    fn open(bus: MockBus) -> Bmp280<MockBus, RecordingDelay> {
        Bmp280::open(bus, RecordingDelay::default(), FOUND, SensorRegisters::default()).unwrap()
    }

    #[test]
    fn test_open_reads_calibration() {
        let sensor = open(reference_bus());
        assert_eq!(sensor.calibration().t1, 27504);
        assert_eq!(sensor.calibration().p9, 6000);
        assert_eq!(sensor.address(), 0x76);
        assert_eq!(sensor.chip_id(), 0x58);
    }

    #[test]
    fn test_open_fails_on_bus_error() {
        let mut bus = reference_bus();
        bus.fail_reads = true;
        let result = Bmp280::open(bus, RecordingDelay::default(), FOUND, SensorRegisters::default());
        assert!(matches!(result, Err(SensorError::Bus(MockError))));
    }

    #[test]
    fn test_configure_writes_in_order() {
        let mut sensor = open(reference_bus());
        let report = sensor.configure();
        assert_eq!(report.outcome(), ConfigureOutcome::Applied);

        let (bus, _) = sensor.release();
        assert_eq!(
            bus.writes,
            vec![(0x76, 0xF2, 0x01), (0x76, 0xF4, 0x27), (0x76, 0xF5, 0xA0)]
        );
    }

    #[test]
    fn test_configure_failure_is_reported_not_raised() {
        let mut bus = reference_bus();
        bus.fail_writes_to.push(0xF2);
        let mut sensor = open(bus);

        let report = sensor.configure();
        assert_eq!(report.outcome(), ConfigureOutcome::ProceededWithDefaults);
        assert_eq!(report.failed.as_slice(), &[RegisterWrite::new(0xF2, 0x01)]);

        // Remaining writes still went out
        let (bus, _) = sensor.release();
        assert_eq!(bus.writes, vec![(0x76, 0xF4, 0x27), (0x76, 0xF5, 0xA0)]);
    }

    #[test]
    fn test_read_raw_idle() {
        let mut sensor = open(reference_bus());
        let raw = sensor.read_raw().unwrap();
        assert_eq!(raw.raw_temperature, 519888);
        assert_eq!(raw.raw_pressure, 415148);

        let (bus, delay) = sensor.release();
        assert_eq!(delay.waited_ns, 0);
        assert_eq!(bus.status_reads, 1);
    }

    #[test]
    fn test_read_raw_waits_when_busy() {
        let mut bus = reference_bus();
        bus.set(0x76, 0xF3, &[0x08]);
        let mut sensor = open(bus);

        sensor.read_raw().unwrap();
        let (_, delay) = sensor.release();
        assert_eq!(delay.waited_ns, 10_000_000);
    }

    #[test]
    fn test_read_raw_propagates_bus_error() {
        let mut sensor = open(reference_bus());
        sensor.bus.fail_reads = true;
        assert!(matches!(sensor.read_raw(), Err(SensorError::Bus(MockError))));
    }

    #[test]
    fn test_read_compensated() {
        let mut sensor = open(reference_bus());
        let reading = BarometricSensor::read(&mut sensor).unwrap();
        assert!((reading.temperature_c - 25.08).abs() < 1e-2);
        assert!((reading.pressure_pa - 100653.27).abs() < 1e-2);
    }
}
