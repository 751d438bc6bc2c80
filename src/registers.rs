//! Register definitions for the BMP280
//!
//! The configuration and identification registers are 8 bits wide and are
//! declared with the `device-driver` DSL, which generates typed field accessors
//! and read-modify-write support. Calibration and measurement bytes are plain
//! byte blocks and are listed in [`address`].
//!
//! ## Register Map
//! - `0x88..=0x9F`: factory calibration, twelve little-endian words
//! - `0xD0`: chip ID, `0xD1`: version, `0xE0`: soft reset
//! - `0xF3`: status, `0xF4`: `ctrl_meas`, `0xF5`: config
//! - `0xF7..=0xFC`: pressure and temperature ADC output

device_driver::create_device!(
    device_name: Bmp280,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// ID - Chip identification (0xD0)
        /// Expected value: 0x56, 0x57 or 0x58
        register ChipId {
            const ADDRESS = 0xD0;
            const SIZE_BITS = 8;

            /// Chip ID
            chip_id: uint = 0..8,
        },

        /// Version - Silicon revision (0xD1)
        register Version {
            const ADDRESS = 0xD1;
            const SIZE_BITS = 8;

            /// Revision number
            version: uint = 0..8,
        },

        /// RESET - Soft reset (0xE0)
        /// Writing 0xB6 triggers a power-on-reset; other values have no effect.
        register SoftReset {
            const ADDRESS = 0xE0;
            const SIZE_BITS = 8;

            /// Reset token
            reset: uint = 0..8,
        },

        /// STATUS - Device status (0xF3)
        register Status {
            const ADDRESS = 0xF3;
            const SIZE_BITS = 8;

            /// NVM data is being copied to image registers
            im_update: bool = 0,
            reserved_2_1: uint = 1..3,
            /// A conversion is running
            measuring: bool = 3,
            reserved_7_4: uint = 4..8,
        },

        /// CTRL_MEAS - Measurement control (0xF4)
        register CtrlMeas {
            const ADDRESS = 0xF4;
            const SIZE_BITS = 8;

            /// Power mode (0=sleep, 1 or 2=forced, 3=normal)
            mode: uint = 0..2,
            /// Pressure oversampling (0=skipped, 1..5 = x1..x16)
            osrs_p: uint = 2..5,
            /// Temperature oversampling (0=skipped, 1..5 = x1..x16)
            osrs_t: uint = 5..8,
        },

        /// CONFIG - Rate, filter and interface options (0xF5)
        register Configuration {
            const ADDRESS = 0xF5;
            const SIZE_BITS = 8;

            /// Enable 3-wire SPI
            spi_three_wire: bool = 0,
            reserved_1: uint = 1..2,
            /// IIR filter time constant (0=off, 1..4 = x2..x16)
            filter: uint = 2..5,
            /// Standby time in normal mode (0..7)
            t_sb: uint = 5..8,
        }
    }
);

// Re-export commonly used types for convenience
pub use Bmp280 as RegisterDevice;

/// Raw register addresses
///
/// Used for block transfers and for the write-through accessors, where the
/// generated field sets are not involved.
pub mod address {
    /// First calibration register (`dig_T1` LSB)
    pub const CALIBRATION_START: u8 = 0x88;
    /// Number of calibration bytes (`dig_T1` through `dig_P9`)
    pub const CALIBRATION_LEN: usize = 24;
    /// Chip identification
    pub const CHIP_ID: u8 = 0xD0;
    /// Silicon revision
    pub const VERSION: u8 = 0xD1;
    /// Soft reset
    pub const SOFT_RESET: u8 = 0xE0;
    /// Device status
    pub const STATUS: u8 = 0xF3;
    /// Measurement control (`ctrl_meas`)
    pub const CONTROL: u8 = 0xF4;
    /// Rate, filter and interface options
    pub const CONFIG: u8 = 0xF5;
    /// Pressure MSB, bits 19:12
    pub const PRESS_MSB: u8 = 0xF7;
    /// Pressure LSB, bits 11:4
    pub const PRESS_LSB: u8 = 0xF8;
    /// Pressure XLSB, bits 3:0 in the upper nibble
    pub const PRESS_XLSB: u8 = 0xF9;
    /// Temperature MSB, bits 19:12
    pub const TEMP_MSB: u8 = 0xFA;
    /// Temperature LSB, bits 11:4
    pub const TEMP_LSB: u8 = 0xFB;
    /// Temperature XLSB, bits 3:0 in the upper nibble
    pub const TEMP_XLSB: u8 = 0xFC;
    /// Number of measurement bytes (`press_msb` through `temp_xlsb`)
    pub const DATA_LEN: usize = 6;
}

/// Bit positions and masks of the configuration fields
///
/// These mirror the field ranges declared for `CtrlMeas` and `Configuration` above.
pub mod field {
    /// `ctrl_meas` bits 1:0
    pub const MODE_MASK: u8 = 0b0000_0011;
    /// `ctrl_meas` bits 4:2
    pub const OSRS_P_SHIFT: u8 = 2;
    /// `ctrl_meas` bits 4:2
    pub const OSRS_P_MASK: u8 = 0b0001_1100;
    /// `ctrl_meas` bits 7:5
    pub const OSRS_T_SHIFT: u8 = 5;
    /// `ctrl_meas` bits 7:5
    pub const OSRS_T_MASK: u8 = 0b1110_0000;
    /// `config` bits 4:2
    pub const FILTER_SHIFT: u8 = 2;
    /// `config` bits 4:2
    pub const FILTER_MASK: u8 = 0b0001_1100;
    /// `config` bits 7:5
    pub const T_SB_SHIFT: u8 = 5;
    /// `config` bits 7:5
    pub const T_SB_MASK: u8 = 0b1110_0000;
}
