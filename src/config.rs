//! Measurement configuration types
//!
//! Each enum carries the manufacturer's raw field encoding as its discriminant.
//! The fields live in two registers:
//! - `ctrl_meas` (0xF4): `osrs_t[7:5]`, `osrs_p[4:2]`, `mode[1:0]`
//! - `config` (0xF5): `t_sb[7:5]`, `filter[4:2]`
//!
//! # Example
//!
//! ```ignore
//! # use bmp280::{Bmp280Config, Filter, Oversampling, StandbyTime};
//! let config = Bmp280Config {
//!     temperature_oversampling: Oversampling::X2,
//!     pressure_oversampling: Oversampling::X16,
//!     filter: Filter::X16,
//!     standby: StandbyTime::Ms0_5,
//! };
//! ```

/// Power mode (`mode[1:0]` in `ctrl_meas`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// No measurements, lowest power; registers stay accessible
    Sleep = 0,
    /// One measurement cycle, then back to sleep
    Forced = 1,
    /// Continuous measurement separated by the standby time
    Normal = 3,
}

impl PowerMode {
    /// Get the raw field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a raw field value (only the low 2 bits are considered)
    ///
    /// Both `0b01` and `0b10` select forced mode on the device.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Sleep,
            3 => Self::Normal,
            _ => Self::Forced,
        }
    }
}

/// Oversampling setting (`osrs_t` and `osrs_p` in `ctrl_meas`)
///
/// Higher oversampling lowers noise at the cost of conversion time and power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Measurement skipped, output stays at 0x80000
    Skipped = 0,
    /// x1 (16-bit resolution)
    X1 = 1,
    /// x2 (17-bit resolution)
    X2 = 2,
    /// x4 (18-bit resolution)
    X4 = 3,
    /// x8 (19-bit resolution)
    X8 = 4,
    /// x16 (20-bit resolution)
    X16 = 5,
}

impl Oversampling {
    /// Get the raw field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a raw 3-bit field value
    ///
    /// Encodings `0b110` and `0b111` behave as x16 on the device.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Skipped,
            1 => Self::X1,
            2 => Self::X2,
            3 => Self::X4,
            4 => Self::X8,
            _ => Self::X16,
        }
    }

    /// Number of ADC conversions averaged per sample (0 when skipped)
    #[must_use]
    pub const fn factor(self) -> u8 {
        match self {
            Self::Skipped => 0,
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// IIR filter coefficient (`filter` in `config`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Filter {
    /// Filter disabled
    Off = 0,
    /// Coefficient 2
    X2 = 1,
    /// Coefficient 4
    X4 = 2,
    /// Coefficient 8
    X8 = 3,
    /// Coefficient 16
    X16 = 4,
}

impl Filter {
    /// Get the raw field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a raw 3-bit field value (reserved encodings read as x16)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Off,
            1 => Self::X2,
            2 => Self::X4,
            3 => Self::X8,
            _ => Self::X16,
        }
    }

    /// Filter coefficient (1 when disabled)
    #[must_use]
    pub const fn coefficient(self) -> u8 {
        match self {
            Self::Off => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// Inactive duration between measurements in normal mode (`t_sb` in `config`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandbyTime {
    /// 0.5 ms
    Ms0_5 = 0,
    /// 62.5 ms
    Ms62_5 = 1,
    /// 125 ms
    Ms125 = 2,
    /// 250 ms
    Ms250 = 3,
    /// 500 ms
    Ms500 = 4,
    /// 1000 ms
    Ms1000 = 5,
    /// 2000 ms
    Ms2000 = 6,
    /// 4000 ms
    Ms4000 = 7,
}

impl StandbyTime {
    /// Get the raw field value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a raw 3-bit field value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Ms0_5,
            1 => Self::Ms62_5,
            2 => Self::Ms125,
            3 => Self::Ms250,
            4 => Self::Ms500,
            5 => Self::Ms1000,
            6 => Self::Ms2000,
            _ => Self::Ms4000,
        }
    }

    /// Standby duration in microseconds
    #[must_use]
    pub const fn duration_us(self) -> u32 {
        match self {
            Self::Ms0_5 => 500,
            Self::Ms62_5 => 62_500,
            Self::Ms125 => 125_000,
            Self::Ms250 => 250_000,
            Self::Ms500 => 500_000,
            Self::Ms1000 => 1_000_000,
            Self::Ms2000 => 2_000_000,
            Self::Ms4000 => 4_000_000,
        }
    }
}

/// Measurement configuration applied by [`Bmp280Driver::init`](crate::Bmp280Driver::init)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bmp280Config {
    /// Temperature oversampling
    pub temperature_oversampling: Oversampling,
    /// Pressure oversampling
    pub pressure_oversampling: Oversampling,
    /// IIR filter coefficient
    pub filter: Filter,
    /// Standby time between normal-mode measurements
    pub standby: StandbyTime,
}

impl Bmp280Config {
    /// Low-rate weather station: x1/x1, filter off
    #[must_use]
    pub const fn weather_monitoring() -> Self {
        Self {
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X1,
            filter: Filter::Off,
            standby: StandbyTime::Ms1000,
        }
    }

    /// Indoor navigation: x2/x16, filter 16, ~26 Hz output rate
    #[must_use]
    pub const fn indoor_navigation() -> Self {
        Self {
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            filter: Filter::X16,
            standby: StandbyTime::Ms0_5,
        }
    }

    /// Handheld device, low power: x1/x16, filter 4
    #[must_use]
    pub const fn handheld_low_power() -> Self {
        Self {
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X16,
            filter: Filter::X4,
            standby: StandbyTime::Ms62_5,
        }
    }
}

impl Default for Bmp280Config {
    fn default() -> Self {
        Self {
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X1,
            filter: Filter::Off,
            standby: StandbyTime::Ms0_5,
        }
    }
}
