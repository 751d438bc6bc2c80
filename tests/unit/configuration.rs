//! Unit tests for the configuration setters and readback

use crate::common::test_utils::create_mock_driver_with_config;
use crate::common::{MockDelay, Operation, create_initialized_driver};
use bmp280::registers::address;
use bmp280::{Bmp280Config, Filter, Oversampling, PowerMode, StandbyTime};

#[test]
fn test_filter_after_standby_keeps_standby_bits() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_standby_time(StandbyTime::Ms1000).unwrap();
    assert_eq!(interface.get_register(address::CONFIG), 0xA0);

    driver.set_iir_filter(Filter::X16).unwrap();
    let config = interface.get_register(address::CONFIG);
    assert_eq!(config, 0xB0);
    assert_eq!(config >> 5, StandbyTime::Ms1000.bits());
}

#[test]
fn test_standby_keeps_filter_and_three_wire_bit() {
    let (mut driver, interface) = create_initialized_driver();

    // spi3w_en = 1, filter = x8
    interface.set_register(address::CONFIG, 0x0D);

    driver.set_standby_time(StandbyTime::Ms125).unwrap();

    assert_eq!(interface.get_register(address::CONFIG), 0x4D);
}

#[test]
fn test_power_mode_keeps_oversampling() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_register(address::CONTROL, 0xB4);

    driver.set_power_mode(PowerMode::Normal).unwrap();
    assert_eq!(interface.get_register(address::CONTROL), 0xB7);

    driver.set_power_mode(PowerMode::Sleep).unwrap();
    assert_eq!(interface.get_register(address::CONTROL), 0xB4);
}

#[test]
fn test_oversampling_setters_touch_their_own_field() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_register(address::CONTROL, 0x03);

    driver
        .set_temperature_oversampling(Oversampling::X16)
        .unwrap();
    assert_eq!(interface.get_register(address::CONTROL), 0xA3);

    driver.set_pressure_oversampling(Oversampling::X2).unwrap();
    assert_eq!(interface.get_register(address::CONTROL), 0xAB);

    driver
        .set_temperature_oversampling(Oversampling::Skipped)
        .unwrap();
    assert_eq!(interface.get_register(address::CONTROL), 0x0B);
}

#[test]
fn test_setter_is_single_read_modify_write() {
    let (mut driver, interface) = create_initialized_driver();

    driver.set_iir_filter(Filter::X2).unwrap();

    assert_eq!(interface.operations(), vec![
        Operation::ReadRegister {
            address: address::CONFIG,
            value: 0x00
        },
        Operation::WriteRegister {
            address: address::CONFIG,
            value: 0x04
        },
    ]);
}

#[test]
fn test_setters_update_cached_config() {
    let (mut driver, _interface) = create_initialized_driver();
    assert_eq!(*driver.config(), Bmp280Config::default());

    driver
        .set_temperature_oversampling(Oversampling::X8)
        .unwrap();
    driver.set_pressure_oversampling(Oversampling::X4).unwrap();
    driver.set_iir_filter(Filter::X2).unwrap();
    driver.set_standby_time(StandbyTime::Ms4000).unwrap();

    assert_eq!(*driver.config(), Bmp280Config {
        temperature_oversampling: Oversampling::X8,
        pressure_oversampling: Oversampling::X4,
        filter: Filter::X2,
        standby: StandbyTime::Ms4000,
    });
    assert_eq!(driver.read_config().unwrap(), *driver.config());
}

#[test]
fn test_read_config_decodes_registers() {
    let (mut driver, interface) = create_initialized_driver();

    // osrs_t = x2, osrs_p = x16, mode = forced
    interface.set_register(address::CONTROL, 0x55);
    // t_sb = 500 ms, filter = x4
    interface.set_register(address::CONFIG, 0x88);

    assert_eq!(driver.read_config().unwrap(), Bmp280Config {
        temperature_oversampling: Oversampling::X2,
        pressure_oversampling: Oversampling::X16,
        filter: Filter::X4,
        standby: StandbyTime::Ms500,
    });
    assert_eq!(driver.read_power_mode().unwrap(), PowerMode::Forced);
}

#[test]
fn test_read_power_mode_treats_both_forced_encodings_alike() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_register(address::CONTROL, 0x01);
    assert_eq!(driver.read_power_mode().unwrap(), PowerMode::Forced);

    interface.set_register(address::CONTROL, 0x02);
    assert_eq!(driver.read_power_mode().unwrap(), PowerMode::Forced);

    interface.set_register(address::CONTROL, 0x00);
    assert_eq!(driver.read_power_mode().unwrap(), PowerMode::Sleep);
}

#[test]
fn test_raw_register_access_bypasses_cached_config() {
    let (mut driver, interface) = create_initialized_driver();
    let cached = *driver.config();

    driver.write_control_register(0xFF).unwrap();
    driver.write_config_register(0xE0).unwrap();

    assert_eq!(interface.get_register(address::CONTROL), 0xFF);
    assert_eq!(interface.get_register(address::CONFIG), 0xE0);
    assert_eq!(driver.read_control_register().unwrap(), 0xFF);
    assert_eq!(driver.read_config_register().unwrap(), 0xE0);
    assert_eq!(*driver.config(), cached);
}

#[test]
fn test_status_bits() {
    let (mut driver, interface) = create_initialized_driver();

    interface.set_register(address::STATUS, 0x09);
    assert_eq!(driver.status().unwrap(), 0x09);
    assert!(driver.is_measuring().unwrap());
    assert!(driver.is_updating().unwrap());

    interface.set_register(address::STATUS, 0x08);
    assert!(driver.is_measuring().unwrap());
    assert!(!driver.is_updating().unwrap());

    interface.set_register(address::STATUS, 0x00);
    assert!(!driver.is_measuring().unwrap());
    assert!(!driver.is_updating().unwrap());
}

#[test]
fn test_presets_survive_init() {
    for preset in [
        Bmp280Config::weather_monitoring(),
        Bmp280Config::indoor_navigation(),
        Bmp280Config::handheld_low_power(),
    ] {
        let (mut driver, _interface) = create_mock_driver_with_config(preset);
        driver.init(&mut MockDelay).unwrap();

        assert_eq!(driver.read_config().unwrap(), preset);
        assert_eq!(driver.read_power_mode().unwrap(), PowerMode::Normal);
    }
}

#[test]
fn test_version_register() {
    let (mut driver, interface) = create_initialized_driver();
    interface.set_register(address::VERSION, 0x02);

    assert_eq!(driver.read_version().unwrap(), 0x02);
}
