//! In-test fakes for the hardware collaborators

use std::cell::Cell;
use std::collections::VecDeque;

use barolink_core::traits::{BarometricSensor, RawSample, Reading, SensorError};
use barolink_display::PanelTransport;
use barolink_hal::{I2cBus, MacAddress, Radio, TickSource};
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

/// Datasheet reference calibration block
pub const REFERENCE_CALIBRATION: [u8; 24] = [
    112, 107, 67, 103, 24, 252, 125, 142, 67, 214, 208, 11, 39, 11, 140, 0, 249, 255, 140, 60, 248,
    198, 112, 23,
];

/// Data block decoding to rawT = 519888, rawP = 415148
pub const REFERENCE_DATA: [u8; 6] = [101, 90, 192, 126, 237, 0];

/// Single-device register map
pub struct FakeBus {
    pub address: u8,
    pub registers: [u8; 256],
    pub fail_reads: bool,
    /// Reads starting at this register fail
    pub fail_register: Option<u8>,
    /// Writes to this register fail
    pub reject_write: Option<u8>,
    pub writes: Vec<(u8, u8)>,
}

impl FakeBus {
    /// A BMP280 at `address` holding the reference calibration and sample
    pub fn bmp280(address: u8) -> Self {
        let mut registers = [0u8; 256];
        registers[0xD0] = 0x58;
        registers[0x88..0x88 + 24].copy_from_slice(&REFERENCE_CALIBRATION);
        registers[0xF7..0xF7 + 6].copy_from_slice(&REFERENCE_DATA);
        Self {
            address,
            registers,
            fail_reads: false,
            fail_register: None,
            reject_write: None,
            writes: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            address: 0,
            registers: [0u8; 256],
            fail_reads: false,
            fail_register: None,
            reject_write: None,
            writes: Vec::new(),
        }
    }
}

impl I2cBus for FakeBus {
    type Error = Fault;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Fault> {
        if address != self.address {
            return Err(Fault);
        }
        if let [register, value] = *data {
            if self.reject_write == Some(register) {
                return Err(Fault);
            }
            self.registers[register as usize] = value;
            self.writes.push((register, value));
        }
        Ok(())
    }

    fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), Fault> {
        Err(Fault)
    }

    fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), Fault> {
        if address != self.address || self.fail_reads {
            return Err(Fault);
        }
        let start = write.first().copied().ok_or(Fault)?;
        if self.fail_register == Some(start) {
            return Err(Fault);
        }
        let start = start as usize;
        let len = read.len();
        read.copy_from_slice(&self.registers[start..start + len]);
        Ok(())
    }
}

/// Sensor returning scripted raw samples
pub struct FakeSensor {
    pub samples: VecDeque<Result<RawSample, SensorError<Fault>>>,
    pub reading: Reading,
}

impl FakeSensor {
    pub fn new(reading: Reading) -> Self {
        Self {
            samples: VecDeque::new(),
            reading,
        }
    }
}

impl BarometricSensor for FakeSensor {
    type Error = Fault;

    fn read_raw(&mut self) -> Result<RawSample, SensorError<Fault>> {
        self.samples
            .pop_front()
            .unwrap_or(Ok(RawSample::default()))
    }

    fn compensate(&self, _raw: RawSample) -> Reading {
        self.reading
    }
}

/// Delay that accumulates requested time instead of sleeping
#[derive(Default)]
pub struct NoopDelay {
    pub total_ns: u64,
}

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Clock advanced by hand
#[derive(Default)]
pub struct ManualClock {
    pub now: Cell<u32>,
}

impl ManualClock {
    pub fn at(now: u32) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl TickSource for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Radio with scripted send results and an inbox
#[derive(Default)]
pub struct ScriptedRadio {
    pub fail_station: bool,
    pub fail_add_peer: bool,
    pub fail_receive: bool,
    pub peers: Vec<MacAddress>,
    pub send_results: VecDeque<bool>,
    pub sent: Vec<(MacAddress, Vec<u8>)>,
    pub inbox: VecDeque<(MacAddress, Vec<u8>)>,
}

impl Radio for ScriptedRadio {
    type Error = Fault;

    fn start_station(&mut self, _channel: u8) -> Result<(), Fault> {
        if self.fail_station {
            Err(Fault)
        } else {
            Ok(())
        }
    }

    fn enable_peer_protocol(&mut self) -> Result<(), Fault> {
        Ok(())
    }

    fn add_peer(&mut self, peer: &MacAddress, _channel: u8, _encrypt: bool) -> Result<(), Fault> {
        if self.fail_add_peer {
            return Err(Fault);
        }
        self.peers.push(*peer);
        Ok(())
    }

    fn send(&mut self, peer: &MacAddress, payload: &[u8]) -> Result<(), Fault> {
        if self.send_results.pop_front().unwrap_or(true) {
            self.sent.push((*peer, payload.to_vec()));
            Ok(())
        } else {
            Err(Fault)
        }
    }

    fn try_receive(&mut self, buf: &mut [u8]) -> Result<Option<(MacAddress, usize)>, Fault> {
        if self.fail_receive {
            return Err(Fault);
        }
        Ok(self.inbox.pop_front().map(|(mac, data)| {
            buf[..data.len()].copy_from_slice(&data);
            (mac, data.len())
        }))
    }
}

/// Panel transport that records every byte
#[derive(Default)]
pub struct RecordingTransport {
    pub commands: Vec<u8>,
    pub frames: Vec<Vec<u8>>,
    pub fail: bool,
}

impl PanelTransport for RecordingTransport {
    type Error = Fault;

    fn write_command(&mut self, command: u8) -> Result<(), Fault> {
        if self.fail {
            return Err(Fault);
        }
        self.commands.push(command);
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Fault> {
        if self.fail {
            return Err(Fault);
        }
        self.frames.push(frame.to_vec());
        Ok(())
    }
}
