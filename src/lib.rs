#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod config;
pub mod device;
pub mod interface;
pub mod measurement;
pub mod registers;

// Re-export main types
pub use calibration::{Calibration, CompensatedTemperature};
pub use config::{Bmp280Config, Filter, Oversampling, PowerMode, StandbyTime};
pub use device::Bmp280Driver;
pub use interface::{I2cInterface, RegisterBus, RegisterTransport, SpiInterface};
pub use measurement::RawSample;

/// BMP280 I2C address when SDO is tied to GND (0x76)
///
/// This is the first address tried by [`Bmp280Driver::probe`].
pub const I2C_ADDRESS_PRIMARY: u8 = 0x76;

/// BMP280 I2C address when SDO is tied to VDDIO (0x77)
pub const I2C_ADDRESS_SECONDARY: u8 = 0x77;

/// Addresses consulted during discovery, in order
pub const I2C_ADDRESS_CANDIDATES: [u8; 2] = [I2C_ADDRESS_PRIMARY, I2C_ADDRESS_SECONDARY];

/// Chip ID values reported by BMP280 parts
///
/// `0x56` and `0x57` are engineering samples, `0x58` is the mass-production part.
pub const KNOWN_CHIP_IDS: [u8; 3] = [0x56, 0x57, 0x58];

/// Token written to the `RESET` register to trigger a power-on-reset sequence
pub const SOFT_RESET_TOKEN: u8 = 0xB6;

/// Returns `true` if `chip_id` belongs to a supported part
#[must_use]
pub fn is_known_chip_id(chip_id: u8) -> bool {
    KNOWN_CHIP_IDS.contains(&chip_id)
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// A device answered but its chip ID is not a BMP280 (contains the value read)
    UnknownDevice {
        /// Chip ID read from register `0xD0`
        chip_id: u8,
    },
    /// No candidate address produced a responding device
    DeviceNotFound {
        /// Addresses that were tried, in order
        addresses: [u8; 2],
    },
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
