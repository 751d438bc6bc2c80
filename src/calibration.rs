//! Factory calibration coefficients and temperature compensation
//!
//! The BMP280 stores twelve trimming words in NVM (registers 0x88..=0x9F,
//! little-endian). `dig_T1` and `dig_P1` are unsigned; every other word is a
//! two's-complement signed value.
//!
//! Two compensation paths are provided:
//! - [`Calibration::compensate_temperature`]: the floating-point reference
//!   formula, used by [`Bmp280Driver::refresh`](crate::Bmp280Driver::refresh)
//! - [`Calibration::compensate_temperature_fixed`]: the 32-bit integer formula,
//!   returning centi-degrees and the intermediate `t_fine`

use crate::registers::address;

/// Factory-trimmed calibration coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Temperature coefficient 1 (unsigned)
    pub dig_t1: u16,
    /// Temperature coefficient 2
    pub dig_t2: i16,
    /// Temperature coefficient 3
    pub dig_t3: i16,
    /// Pressure coefficient 1 (unsigned)
    pub dig_p1: u16,
    /// Pressure coefficient 2
    pub dig_p2: i16,
    /// Pressure coefficient 3
    pub dig_p3: i16,
    /// Pressure coefficient 4
    pub dig_p4: i16,
    /// Pressure coefficient 5
    pub dig_p5: i16,
    /// Pressure coefficient 6
    pub dig_p6: i16,
    /// Pressure coefficient 7
    pub dig_p7: i16,
    /// Pressure coefficient 8
    pub dig_p8: i16,
    /// Pressure coefficient 9
    pub dig_p9: i16,
}

/// Result of the fixed-point temperature compensation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedTemperature {
    /// Fine temperature, the carry-over value consumed by pressure compensation
    pub t_fine: i32,
    /// Temperature in 0.01 °C (2508 = 25.08 °C)
    pub centi_celsius: i32,
}

impl CompensatedTemperature {
    /// Temperature in °C
    #[must_use]
    pub fn celsius(&self) -> f32 {
        self.centi_celsius as f32 / 100.0
    }
}

impl Calibration {
    /// Decode the 24-byte calibration block starting at `dig_T1` LSB (0x88)
    #[must_use]
    pub const fn from_le_bytes(bytes: &[u8; address::CALIBRATION_LEN]) -> Self {
        Self {
            dig_t1: u16::from_le_bytes([bytes[0], bytes[1]]),
            dig_t2: i16::from_le_bytes([bytes[2], bytes[3]]),
            dig_t3: i16::from_le_bytes([bytes[4], bytes[5]]),
            dig_p1: u16::from_le_bytes([bytes[6], bytes[7]]),
            dig_p2: i16::from_le_bytes([bytes[8], bytes[9]]),
            dig_p3: i16::from_le_bytes([bytes[10], bytes[11]]),
            dig_p4: i16::from_le_bytes([bytes[12], bytes[13]]),
            dig_p5: i16::from_le_bytes([bytes[14], bytes[15]]),
            dig_p6: i16::from_le_bytes([bytes[16], bytes[17]]),
            dig_p7: i16::from_le_bytes([bytes[18], bytes[19]]),
            dig_p8: i16::from_le_bytes([bytes[20], bytes[21]]),
            dig_p9: i16::from_le_bytes([bytes[22], bytes[23]]),
        }
    }

    /// Decode calibration from the twelve raw words in register order
    ///
    /// Words 1, 2 and 4..=11 are reinterpreted as two's-complement.
    #[must_use]
    pub const fn from_words(words: [u16; 12]) -> Self {
        Self {
            dig_t1: words[0],
            dig_t2: words[1] as i16,
            dig_t3: words[2] as i16,
            dig_p1: words[3],
            dig_p2: words[4] as i16,
            dig_p3: words[5] as i16,
            dig_p4: words[6] as i16,
            dig_p5: words[7] as i16,
            dig_p6: words[8] as i16,
            dig_p7: words[9] as i16,
            dig_p8: words[10] as i16,
            dig_p9: words[11] as i16,
        }
    }

    /// Compensate a raw temperature code, returning °C
    ///
    /// ```text
    /// var1 = (adc_T / 16384 - T1 / 1024) * T2
    /// var2 = (adc_T / 131072 - T1 / 8192)^2 * T3
    /// T    = (var1 + var2) / 5120
    /// ```
    #[must_use]
    pub fn compensate_temperature(&self, adc_t: u32) -> f32 {
        let adc = f64::from(adc_t);
        let t1 = f64::from(self.dig_t1);

        let var1 = (adc / 16384.0 - t1 / 1024.0) * f64::from(self.dig_t2);
        let delta = adc / 131_072.0 - t1 / 8192.0;
        let var2 = delta * delta * f64::from(self.dig_t3);

        ((var1 + var2) / 5120.0) as f32
    }

    /// Compensate a raw temperature code with the integer formula
    ///
    /// Resolution is 0.01 °C. Intermediates are widened to 64 bits so that
    /// out-of-range inputs cannot overflow; for 20-bit codes and datasheet
    /// coefficient ranges the result is identical to the 32-bit reference.
    #[must_use]
    pub fn compensate_temperature_fixed(&self, adc_t: u32) -> CompensatedTemperature {
        let adc = i64::from(adc_t);
        let t1 = i64::from(self.dig_t1);

        let var1 = (((adc >> 3) - (t1 << 1)) * i64::from(self.dig_t2)) >> 11;
        let delta = (adc >> 4) - t1;
        let var2 = (((delta * delta) >> 12) * i64::from(self.dig_t3)) >> 14;

        let t_fine = var1 + var2;
        let centi_celsius = (t_fine * 5 + 128) >> 8;

        CompensatedTemperature {
            t_fine: t_fine as i32,
            centi_celsius: centi_celsius as i32,
        }
    }
}
