//! I2C bus abstractions
//!
//! Provides the bus trait used by the sensor driver and the panel transport,
//! plus an adapter for any `embedded-hal` 1.0 blocking I2C implementation.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Read consecutive registers starting at `register`
    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register], buf)
    }

    /// Read a single register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_registers(address, register, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[register, value])
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }
}

/// Adapter exposing an `embedded-hal` blocking I2C peripheral as an [`I2cBus`]
///
/// Chip HALs (embassy-rp, embassy-stm32, esp-hal) all implement
/// [`embedded_hal::i2c::I2c`], so board crates wrap their peripheral here.
pub struct EmbeddedHalBus<I2C> {
    i2c: I2C,
}

impl<I2C> EmbeddedHalBus<I2C> {
    /// Wrap an `embedded-hal` I2C peripheral
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, write_data, read_buf)
    }
}
