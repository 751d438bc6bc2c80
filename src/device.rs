//! High-level driver API for the BMP280
//!
//! This module ties the register map, calibration and sample assembly together:
//! device discovery, the start-up sequence, configuration setters and
//! measurement readout.

use crate::calibration::{Calibration, CompensatedTemperature};
use crate::config::{Bmp280Config, Filter, Oversampling, PowerMode, StandbyTime};
use crate::interface::{I2cInterface, RegisterBus, RegisterTransport};
use crate::measurement::RawSample;
use crate::registers::{RegisterDevice, address};
use crate::{Error, I2C_ADDRESS_CANDIDATES, SOFT_RESET_TOKEN, is_known_chip_id};

/// Start-up time after power-on or soft reset (datasheet `t_startup`)
const STARTUP_TIME_MS: u32 = 2;

/// Upper bound for the NVM-to-image copy that follows a reset
const MAX_NVM_COPY_MS: u32 = 10;

/// Main driver for the BMP280
pub struct Bmp280Driver<T> {
    device: RegisterDevice<RegisterBus<T>>,
    config: Bmp280Config,
    calibration: Option<Calibration>,
    sample: Option<RawSample>,
    temperature: Option<f32>,
}

impl<T> Bmp280Driver<T>
where
    T: RegisterTransport,
{
    /// Create a new BMP280 driver bound to `transport`
    ///
    /// No bus traffic happens here. Call [`init()`](Self::init) before reading
    /// measurements.
    pub fn new(transport: T, config: Bmp280Config) -> Self {
        Self {
            device: RegisterDevice::new(RegisterBus::new(transport)),
            config,
            calibration: None,
            sample: None,
            temperature: None,
        }
    }

    /// Initialize the device
    ///
    /// Runs the start-up sequence in this order:
    /// 1. Verify the chip ID
    /// 2. Soft reset, then wait for the NVM copy to finish
    /// 3. Normal power mode
    /// 4. Temperature, then pressure oversampling from the configuration
    /// 5. IIR filter
    /// 6. Standby time
    /// 7. Read and cache the calibration coefficients
    /// 8. One [`refresh()`](Self::refresh)
    ///
    /// Every configuration step is a read-modify-write of its register, so
    /// each one sees the state left by the previous step.
    ///
    /// # Arguments
    ///
    /// * `delay` - Delay provider implementing `embedded_hal::delay::DelayNs`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The chip ID is not one of [`KNOWN_CHIP_IDS`](crate::KNOWN_CHIP_IDS)
    ///
    /// # Example
    ///
    /// ```ignore
    /// use embassy_time::Delay;
    /// let mut delay = Delay;
    /// sensor.init(&mut delay)?;
    /// ```
    pub fn init<D>(&mut self, delay: &mut D) -> Result<(), Error<T::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let chip_id = self.read_chip_id()?;
        if !is_known_chip_id(chip_id) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unknown chip ID {=u8:#x}", chip_id);

            return Err(Error::UnknownDevice { chip_id });
        }

        self.reset(delay)?;

        let config = self.config;
        self.set_power_mode(PowerMode::Normal)?;
        self.set_temperature_oversampling(config.temperature_oversampling)?;
        self.set_pressure_oversampling(config.pressure_oversampling)?;
        self.set_iir_filter(config.filter)?;
        self.set_standby_time(config.standby)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("BMP280 {=u8:#x} configured: {}", chip_id, config);

        self.calibration = Some(self.read_calibration()?);

        self.refresh()
    }

    /// Trigger a soft reset
    ///
    /// Writes [`SOFT_RESET_TOKEN`] to the `RESET` register, waits the start-up
    /// time, then polls `im_update` until the calibration image is ready.
    /// All control registers return to their power-on values (sleep mode,
    /// measurements skipped). Cached calibration is kept since the NVM
    /// contents do not change.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), Error<T::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.device.soft_reset().write(|w| {
            w.set_reset(SOFT_RESET_TOKEN);
        })?;

        delay.delay_ms(STARTUP_TIME_MS);

        for _ in 0..MAX_NVM_COPY_MS {
            if !self.device.status().read()?.im_update() {
                return Ok(());
            }
            delay.delay_ms(1);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("NVM copy still running {=u32} ms after reset", MAX_NVM_COPY_MS);

        Ok(())
    }

    /// Read the chip ID register (0xD0)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_chip_id(&mut self) -> Result<u8, Error<T::Error>> {
        let reg = self.device.chip_id().read()?;
        Ok(reg.chip_id())
    }

    /// Read the silicon revision register (0xD1)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_version(&mut self) -> Result<u8, Error<T::Error>> {
        let reg = self.device.version().read()?;
        Ok(reg.version())
    }

    /// Read the raw status register (0xF3)
    ///
    /// Bit 3 is `measuring`, bit 0 is `im_update`.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn status(&mut self) -> Result<u8, Error<T::Error>> {
        Ok(self.device.interface.transport.read_byte(address::STATUS)?)
    }

    /// `true` while a conversion is running
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_measuring(&mut self) -> Result<bool, Error<T::Error>> {
        Ok(self.device.status().read()?.measuring())
    }

    /// `true` while NVM data is being copied to the image registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn is_updating(&mut self) -> Result<bool, Error<T::Error>> {
        Ok(self.device.status().read()?.im_update())
    }

    /// Read the calibration coefficients from the device
    ///
    /// This does not touch the cached copy used for compensation; only
    /// [`init()`](Self::init) replaces that.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_calibration(&mut self) -> Result<Calibration, Error<T::Error>> {
        let mut buffer = [0u8; address::CALIBRATION_LEN];
        self.device
            .interface
            .transport
            .read_block(address::CALIBRATION_START, &mut buffer)?;

        Ok(Calibration::from_le_bytes(&buffer))
    }

    /// Read a new raw sample and update the current temperature
    ///
    /// The six data registers are read in one block, pressure MSB first. The
    /// previous sample is replaced only once all six bytes have been read.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The previous
    /// sample and temperature are left untouched in that case.
    pub fn refresh(&mut self) -> Result<(), Error<T::Error>> {
        let mut data = [0u8; address::DATA_LEN];
        self.device
            .interface
            .transport
            .read_block(address::PRESS_MSB, &mut data)?;

        let sample = RawSample::from_bytes(&data);

        self.sample = Some(sample);
        self.temperature = self
            .calibration
            .map(|calibration| calibration.compensate_temperature(sample.temperature));

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "adc_P={=u32} adc_T={=u32}",
            sample.pressure,
            sample.temperature
        );

        Ok(())
    }

    /// Temperature in °C from the last successful [`refresh()`](Self::refresh)
    ///
    /// Returns `None` until calibration has been cached by [`init()`](Self::init)
    /// and a sample has been read.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Temperature of the last sample using the integer compensation formula
    ///
    /// Returns `None` under the same conditions as [`temperature()`](Self::temperature).
    #[must_use]
    pub fn temperature_fixed(&self) -> Option<CompensatedTemperature> {
        let calibration = self.calibration?;
        let sample = self.sample?;
        Some(calibration.compensate_temperature_fixed(sample.temperature))
    }

    /// Temperature of the last sample in 0.01 °C
    #[must_use]
    pub fn temperature_centi(&self) -> Option<i32> {
        self.temperature_fixed()
            .map(|temperature| temperature.centi_celsius)
    }

    /// Last raw sample, if any
    #[must_use]
    pub const fn raw_sample(&self) -> Option<RawSample> {
        self.sample
    }

    /// Cached calibration coefficients, if [`init()`](Self::init) has run
    #[must_use]
    pub const fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    /// Configuration applied by [`init()`](Self::init)
    ///
    /// The oversampling, filter and standby setters keep this in sync.
    #[must_use]
    pub const fn config(&self) -> &Bmp280Config {
        &self.config
    }

    /// Set the power mode (`ctrl_meas[1:0]`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<T::Error>> {
        self.device.ctrl_meas().modify(|w| {
            w.set_mode(mode.bits());
        })?;
        Ok(())
    }

    /// Set temperature oversampling (`ctrl_meas[7:5]`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_temperature_oversampling(
        &mut self,
        oversampling: Oversampling,
    ) -> Result<(), Error<T::Error>> {
        self.device.ctrl_meas().modify(|w| {
            w.set_osrs_t(oversampling.bits());
        })?;
        self.config.temperature_oversampling = oversampling;
        Ok(())
    }

    /// Set pressure oversampling (`ctrl_meas[4:2]`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_pressure_oversampling(
        &mut self,
        oversampling: Oversampling,
    ) -> Result<(), Error<T::Error>> {
        self.device.ctrl_meas().modify(|w| {
            w.set_osrs_p(oversampling.bits());
        })?;
        self.config.pressure_oversampling = oversampling;
        Ok(())
    }

    /// Set the IIR filter coefficient (`config[4:2]`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_iir_filter(&mut self, filter: Filter) -> Result<(), Error<T::Error>> {
        self.device.configuration().modify(|w| {
            w.set_filter(filter.bits());
        })?;
        self.config.filter = filter;
        Ok(())
    }

    /// Set the normal-mode standby time (`config[7:5]`)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_standby_time(&mut self, standby: StandbyTime) -> Result<(), Error<T::Error>> {
        self.device.configuration().modify(|w| {
            w.set_t_sb(standby.bits());
        })?;
        self.config.standby = standby;
        Ok(())
    }

    /// Read the current power mode from the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_power_mode(&mut self) -> Result<PowerMode, Error<T::Error>> {
        let ctrl_meas = self.device.ctrl_meas().read()?;
        Ok(PowerMode::from_bits(ctrl_meas.mode()))
    }

    /// Decode the measurement configuration currently held by the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_config(&mut self) -> Result<Bmp280Config, Error<T::Error>> {
        let ctrl_meas = self.device.ctrl_meas().read()?;
        let config = self.device.configuration().read()?;

        Ok(Bmp280Config {
            temperature_oversampling: Oversampling::from_bits(ctrl_meas.osrs_t()),
            pressure_oversampling: Oversampling::from_bits(ctrl_meas.osrs_p()),
            filter: Filter::from_bits(config.filter()),
            standby: StandbyTime::from_bits(config.t_sb()),
        })
    }

    /// Read the raw `ctrl_meas` register (0xF4)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_control_register(&mut self) -> Result<u8, Error<T::Error>> {
        Ok(self.device.interface.transport.read_byte(address::CONTROL)?)
    }

    /// Write the raw `ctrl_meas` register (0xF4)
    ///
    /// The value is written as-is. Nothing is validated, and the cached
    /// [`config()`](Self::config) is not updated.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_control_register(&mut self, value: u8) -> Result<(), Error<T::Error>> {
        Ok(self
            .device
            .interface
            .transport
            .write_byte(address::CONTROL, value)?)
    }

    /// Read the raw `config` register (0xF5)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_config_register(&mut self) -> Result<u8, Error<T::Error>> {
        Ok(self.device.interface.transport.read_byte(address::CONFIG)?)
    }

    /// Write the raw `config` register (0xF5)
    ///
    /// The value is written as-is. Nothing is validated, and the cached
    /// [`config()`](Self::config) is not updated.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_config_register(&mut self, value: u8) -> Result<(), Error<T::Error>> {
        Ok(self
            .device
            .interface
            .transport
            .write_byte(address::CONFIG, value)?)
    }

    /// Borrow the underlying transport
    pub const fn transport(&self) -> &T {
        self.device.interface.transport()
    }

    /// Consume the driver and return the underlying transport
    pub fn release(self) -> T {
        self.device.interface.release()
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<RegisterBus<T>> {
        &self.device
    }
}

impl<I2C, E> Bmp280Driver<I2cInterface<I2C>>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    /// Find a BMP280 on `i2c` and bind a driver to it
    ///
    /// The candidate addresses [`I2C_ADDRESS_CANDIDATES`] are tried in order.
    /// The first address where a chip ID read succeeds wins; the chip ID itself
    /// is checked later by [`init()`](Self::init). Pass `&mut i2c` to keep
    /// ownership of the bus if discovery fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if every candidate fails.
    pub fn probe(i2c: I2C, config: Bmp280Config) -> Result<Self, Error<E>> {
        let mut i2c = i2c;

        for candidate in I2C_ADDRESS_CANDIDATES {
            let mut interface = I2cInterface::new(i2c, candidate);
            match interface.read_byte(address::CHIP_ID) {
                Ok(_chip_id) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!(
                        "Device at {=u8:#x} answered with chip ID {=u8:#x}",
                        candidate,
                        _chip_id
                    );

                    return Ok(Self::new(interface, config));
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("No response at {=u8:#x}", candidate);

                    i2c = interface.release();
                }
            }
        }

        Err(Error::DeviceNotFound {
            addresses: I2C_ADDRESS_CANDIDATES,
        })
    }

    /// I2C address the driver is bound to
    pub const fn address(&self) -> u8 {
        self.device.interface.transport().address()
    }
}
