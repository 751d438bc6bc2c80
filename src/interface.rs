//! Bus interface implementations for the BMP280
//!
//! The driver only needs to read and write single bytes at a register address.
//! That capability is the [`RegisterTransport`] trait; [`I2cInterface`] and
//! [`SpiInterface`] implement it on top of `embedded-hal` buses.

use crate::I2C_ADDRESS_PRIMARY;

use device_driver::RegisterInterface;

/// Byte-level register access to a BMP280
///
/// Implementors transact with the bus and nothing else: failures are returned
/// as `Self::Error` and are never retried by the driver.
pub trait RegisterTransport {
    /// Error produced by the underlying bus
    type Error;

    /// Read one byte from `register`
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write `value` to `register`
    ///
    /// # Errors
    ///
    /// Returns an error if the bus transaction fails.
    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Read a little-endian 16-bit word stored at `register` and `register + 1`
    ///
    /// # Errors
    ///
    /// Returns an error if either bus transaction fails.
    fn read_word(&mut self, register: u8) -> Result<u16, Self::Error> {
        let low = self.read_byte(register)?;
        let high = self.read_byte(register.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write a little-endian 16-bit word to `register` and `register + 1`
    ///
    /// # Errors
    ///
    /// Returns an error if either bus transaction fails.
    fn write_word(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        let [low, high] = value.to_le_bytes();
        self.write_byte(register, low)?;
        self.write_byte(register.wrapping_add(1), high)
    }

    /// Read `buffer.len()` consecutive registers starting at `register`
    ///
    /// Bytes are read in ascending address order. Bus adapters override this
    /// with a single burst transaction, which is what keeps the device's data
    /// shadowing intact across the six measurement bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if any bus transaction fails. The buffer contents are
    /// unspecified in that case.
    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        for (offset, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read_byte(register.wrapping_add(offset as u8))?;
        }
        Ok(())
    }
}

impl<T: RegisterTransport + ?Sized> RegisterTransport for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error> {
        (**self).read_byte(register)
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_byte(register, value)
    }

    fn read_word(&mut self, register: u8) -> Result<u16, Self::Error> {
        (**self).read_word(register)
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        (**self).write_word(register, value)
    }

    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_block(register, buffer)
    }
}

/// Adapter exposing a [`RegisterTransport`] to the generated register map
///
/// Reads go through [`RegisterTransport::read_block`]; writes are split into
/// one byte transfer per address.
pub struct RegisterBus<T> {
    pub(crate) transport: T,
}

impl<T> RegisterBus<T> {
    /// Wrap a transport
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the wrapped transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the adapter and return the transport
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T> RegisterInterface for RegisterBus<T>
where
    T: RegisterTransport,
{
    type Error = T::Error;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len()
        self.transport.read_block(address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len()
        for (offset, &byte) in write_data.iter().enumerate() {
            self.transport
                .write_byte(address.wrapping_add(offset as u8), byte)?;
        }
        Ok(())
    }
}

/// I2C interface for the BMP280
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the primary address (0x76, SDO to GND)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::primary(i2c);
    /// let mut sensor = Bmp280Driver::new(interface, Bmp280Config::default());
    /// ```
    pub const fn primary(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_PRIMARY,
        }
    }

    /// Create a new I2C interface with the secondary address (0x77, SDO to VDDIO)
    pub const fn secondary(i2c: I2C) -> Self {
        Self {
            i2c,
            address: crate::I2C_ADDRESS_SECONDARY,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterTransport for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        // The register pointer auto-increments during a burst read
        self.i2c.write_read(self.address, &[register], buffer)
    }
}

/// SPI interface for the BMP280
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) pin automatically. The BMP280 latches its interface
/// mode on the first CS falling edge after power-up, so the first transaction
/// switches the device to SPI for the rest of the power cycle.
///
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterTransport for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;

    fn read_byte(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.read_block(register, &mut buffer)?;
        Ok(buffer[0])
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        // For SPI writes, bit 7 of the control byte must be 0
        self.spi.write(&[register & 0x7F, value])
    }

    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        // For SPI reads, bit 7 of the control byte must be 1
        let mut operations = [
            embedded_hal::spi::Operation::Write(&[register | 0x80]),
            embedded_hal::spi::Operation::Read(buffer),
        ];

        self.spi.transaction(&mut operations)
    }
}
