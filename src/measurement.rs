//! Raw ADC sample assembly
//!
//! Each measurement is a 20-bit unsigned code spread over three registers:
//! MSB (bits 19:12), LSB (bits 11:4) and XLSB, whose upper nibble holds
//! bits 3:0. The lower nibble of XLSB is not part of the value.

use crate::registers::address;

/// Largest value a 20-bit ADC code can take
pub const ADC_MAX: u32 = (1 << 20) - 1;

/// Output code reported for a channel whose oversampling is set to skipped
pub const ADC_SKIPPED: u32 = 0x8_0000;

/// Assemble a 20-bit ADC code from its three register bytes
///
/// `((msb << 8 | lsb) << 8 | xlsb) >> 4`
#[must_use]
pub const fn assemble_20bit(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    ((((msb as u32) << 8 | lsb as u32) << 8) | xlsb as u32) >> 4
}

/// Raw pressure and temperature codes from one burst read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Uncompensated pressure code (`adc_P`)
    pub pressure: u32,
    /// Uncompensated temperature code (`adc_T`)
    pub temperature: u32,
}

impl RawSample {
    /// Build a sample from the six data registers, `press_msb` (0xF7) first
    #[must_use]
    pub const fn from_bytes(data: &[u8; address::DATA_LEN]) -> Self {
        Self {
            pressure: assemble_20bit(data[0], data[1], data[2]),
            temperature: assemble_20bit(data[3], data[4], data[5]),
        }
    }

    /// Split the sample back into register bytes (XLSB low nibbles are zero)
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; address::DATA_LEN] {
        let [_, p_msb, p_lsb, p_xlsb] = (self.pressure << 4).to_be_bytes();
        let [_, t_msb, t_lsb, t_xlsb] = (self.temperature << 4).to_be_bytes();
        [p_msb, p_lsb, p_xlsb, t_msb, t_lsb, t_xlsb]
    }

    /// `true` if the temperature channel was skipped by the device
    #[must_use]
    pub const fn temperature_skipped(&self) -> bool {
        self.temperature == ADC_SKIPPED
    }

    /// `true` if the pressure channel was skipped by the device
    #[must_use]
    pub const fn pressure_skipped(&self) -> bool {
        self.pressure == ADC_SKIPPED
    }
}
