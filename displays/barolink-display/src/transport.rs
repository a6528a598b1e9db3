//! Byte-oriented panel transports
//!
//! The display engine only needs two operations from the wire: send one
//! command byte, and send a whole frame whose first byte is already the
//! data-write control byte.

use barolink_hal::I2cBus;

/// Control byte prefixed to every command byte
pub const COMMAND_CONTROL: u8 = 0x80;

/// Panel wire protocol
pub trait PanelTransport {
    /// Error type for transport operations
    type Error;

    /// Send a single command byte
    fn write_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send a frame, control byte included
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<T: PanelTransport + ?Sized> PanelTransport for &mut T {
    type Error = T::Error;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        T::write_command(self, command)
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        T::write_frame(self, frame)
    }
}

/// SSD1306-style panel on an I2C bus
pub struct I2cPanelTransport<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cPanelTransport<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> PanelTransport for I2cPanelTransport<B> {
    type Error = B::Error;

    fn write_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.bus.write(self.address, &[COMMAND_CONTROL, command])
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(self.address, frame)
    }
}
