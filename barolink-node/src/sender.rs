//! Sensor node loop
//!
//! Startup walks discover → calibrate → configure, then the node samples
//! forever. A missing sensor or unreadable calibration stops startup; every
//! later failure is logged and the loop carries on after the usual delay.

use barolink_core::config::{LinkConfig, SenderConfig, SensorRegisters};
use barolink_core::state::{HaltReason, SenderEvent, SenderPhase};
use barolink_core::traits::{BarometricSensor, Reading, SensorError};
use barolink_drivers::sensor::{discover, Bmp280};
use barolink_hal::{I2cBus, Radio};
use barolink_protocol::{
    encode_temperature, PeerRegistration, SendOutcome, TelemetryLink, TemperaturePayload,
};
use embedded_hal::delay::DelayNs;

use crate::error::{SampleError, StartupError};

/// Everything the sensor node needs to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SenderSetup {
    pub registers: SensorRegisters,
    pub link: LinkConfig,
    pub sender: SenderConfig,
}

/// Result of one successful sample cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleReport {
    pub sequence: u32,
    pub reading: Reading,
    pub payload: TemperaturePayload,
    pub outcome: SendOutcome,
}

/// Sensor node: one sensor session, one link, one loop delay
pub struct SenderNode<S, R, D> {
    sensor: S,
    link: TelemetryLink<R>,
    delay: D,
    config: SenderConfig,
    phase: SenderPhase,
    sequence: u32,
}

impl<B, SD, R, D> SenderNode<Bmp280<B, SD>, R, D>
where
    B: I2cBus,
    SD: DelayNs,
    R: Radio,
    D: DelayNs,
{
    /// Find and prepare the sensor, then bring the radio up
    ///
    /// `sensor_delay` covers the busy wait inside a read; `delay` paces the
    /// loop.
    pub fn start(
        mut bus: B,
        sensor_delay: SD,
        radio: R,
        delay: D,
        setup: SenderSetup,
    ) -> Result<Self, StartupError<B::Error, R::Error>> {
        let mut phase = SenderPhase::default();

        let found = match discover(&mut bus, &setup.registers) {
            Ok(found) => found,
            Err(e) => {
                phase = phase.transition(SenderEvent::Fault(HaltReason::SensorNotFound));
                if let SensorError::UnknownChip(id) = e {
                    error!("unsupported chip id {:#x}, phase {}", id, phase);
                } else {
                    error!("no sensor found, phase {}", phase);
                }
                return Err(StartupError::Discovery(e));
            }
        };
        info!("sensor {:#x} found at {:#x}", found.chip_id, found.address);
        phase = phase.transition(SenderEvent::SensorFound);

        let mut sensor = match Bmp280::open(bus, sensor_delay, found, setup.registers) {
            Ok(sensor) => sensor,
            Err(e) => {
                phase = phase.transition(SenderEvent::Fault(HaltReason::CalibrationFailed));
                error!("calibration read failed, phase {}", phase);
                return Err(StartupError::Calibration(e));
            }
        };
        phase = phase.transition(SenderEvent::CalibrationLoaded);

        let report = sensor.configure();
        for write in report.failed.iter() {
            warn!(
                "config write {:#x} <- {:#x} failed",
                write.register, write.value
            );
        }
        debug!("sensor configure: {}", report.outcome());
        phase = phase.transition(SenderEvent::Configured);

        let (link, init) = TelemetryLink::initialize(radio, setup.link)?;
        if let PeerRegistration::Failed(peer) = init.peer {
            warn!("peer registration failed for {}", peer.as_bytes());
        }
        info!("link up on channel {}", init.channel);

        Ok(Self::new(sensor, link, delay, setup.sender, phase))
    }
}

impl<S, R, D> SenderNode<S, R, D>
where
    S: BarometricSensor,
    R: Radio,
    D: DelayNs,
{
    /// Assemble a node from already prepared parts
    pub fn new(
        sensor: S,
        link: TelemetryLink<R>,
        delay: D,
        config: SenderConfig,
        phase: SenderPhase,
    ) -> Self {
        Self {
            sensor,
            link,
            delay,
            config,
            phase,
            sequence: 0,
        }
    }

    pub fn phase(&self) -> SenderPhase {
        self.phase
    }

    /// Sequence number the next successful sample will carry
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn link(&self) -> &TelemetryLink<R> {
        &self.link
    }

    /// Read, compensate, format and send one temperature
    ///
    /// A failed send is reported in the outcome, not as an error.
    pub fn sample_once(&mut self) -> Result<SampleReport, SampleError<S::Error>> {
        let raw = self.sensor.read_raw()?;
        debug!("raw T={} P={}", raw.raw_temperature, raw.raw_pressure);

        let reading = self.sensor.compensate(raw);
        let payload = encode_temperature(reading.temperature_c, self.config.decimals)?;
        let outcome = self.link.send_to_peer(payload.as_bytes());

        info!(
            "#{} T={} C P={} Pa sent: {}",
            self.sequence,
            payload.as_str(),
            reading.pressure_pa,
            outcome
        );

        let report = SampleReport {
            sequence: self.sequence,
            reading,
            payload,
            outcome,
        };
        self.sequence = self.sequence.wrapping_add(1);
        Ok(report)
    }

    /// One loop iteration without the trailing delay
    pub fn step(&mut self) -> Option<SampleReport> {
        match self.sample_once() {
            Ok(report) => Some(report),
            Err(SampleError::Sensor(_)) => {
                error!("sample #{} failed: sensor read", self.sequence);
                None
            }
            Err(SampleError::Payload(e)) => {
                error!("sample #{} failed: {}", self.sequence, e);
                None
            }
        }
    }

    /// Sample forever at the configured interval
    pub fn run(mut self) -> ! {
        loop {
            let _ = self.step();
            self.delay.delay_ms(self.config.sample_interval_ms);
        }
    }
}
