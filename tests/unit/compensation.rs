//! Unit tests for calibration readout and temperature compensation

use crate::common::test_utils::{
    DATASHEET_ADC_P, DATASHEET_ADC_T, assert_float_eq, create_mock_driver, datasheet_calibration,
};
use crate::common::{MockDelay, create_initialized_driver};
use bmp280::Calibration;
use bmp280::registers::address;

#[test]
fn test_calibration_decoded_from_raw_registers() {
    let (mut driver, interface) = create_mock_driver();

    // dig_T1 = 27504, dig_T2 = 26435, dig_T3 = -1000
    for (offset, byte) in [0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC].into_iter().enumerate() {
        interface.set_register(address::CALIBRATION_START + offset as u8, byte);
    }

    let calibration = driver.read_calibration().unwrap();
    assert_eq!(calibration.dig_t1, 27504);
    assert_eq!(calibration.dig_t2, 26435);
    assert_eq!(calibration.dig_t3, -1000);
}

#[test]
fn test_read_calibration_is_one_block() {
    let (mut driver, interface) = create_initialized_driver();

    driver.read_calibration().unwrap();

    let expected: Vec<u8> = (0..address::CALIBRATION_LEN as u8)
        .map(|offset| address::CALIBRATION_START + offset)
        .collect();
    assert_eq!(interface.reads(), expected);
}

#[test]
fn test_read_calibration_leaves_cache_alone() {
    let (mut driver, interface) = create_initialized_driver();
    let replacement = Calibration {
        dig_t2: -26435,
        ..datasheet_calibration()
    };
    interface.set_calibration(&replacement);

    assert_eq!(driver.read_calibration().unwrap(), replacement);
    assert_eq!(driver.calibration(), Some(&datasheet_calibration()));
}

#[test]
fn test_negative_coefficients_flow_through_init() {
    let (mut driver, interface) = create_mock_driver();
    let calibration = Calibration {
        dig_t1: 27000,
        dig_t2: -12000,
        dig_t3: 500,
        ..datasheet_calibration()
    };
    interface.set_calibration(&calibration);
    interface.set_raw_sample(DATASHEET_ADC_P, DATASHEET_ADC_T);

    driver.init(&mut MockDelay).unwrap();

    assert_eq!(driver.calibration(), Some(&calibration));
    assert_float_eq(
        driver.temperature().unwrap(),
        calibration.compensate_temperature(DATASHEET_ADC_T),
        1e-6,
    );
}

#[test]
fn test_temperature_increases_with_adc_code() {
    let calibration = datasheet_calibration();

    let mut previous = calibration.compensate_temperature(300_000);
    for adc_t in (300_000..=700_000).step_by(10_007).skip(1) {
        let current = calibration.compensate_temperature(adc_t);
        assert!(
            current > previous,
            "T({adc_t}) = {current} is not above {previous}"
        );
        previous = current;
    }
}

#[test]
fn test_operating_range_codes() {
    let calibration = datasheet_calibration();

    // Codes around the datasheet example stay within the rated range
    for adc_t in [420_000, 519_888, 600_000] {
        let celsius = calibration.compensate_temperature(adc_t);
        assert!(
            (-40.0..=85.0).contains(&celsius),
            "T({adc_t}) = {celsius} is outside the operating range"
        );
    }
}

#[test]
fn test_fixed_and_float_agree_through_driver() {
    let (mut driver, interface) = create_initialized_driver();

    for adc_t in [450_000, DATASHEET_ADC_T, 580_000] {
        interface.set_raw_sample(DATASHEET_ADC_P, adc_t);
        driver.refresh().unwrap();

        let float = driver.temperature().unwrap();
        let centi = driver.temperature_centi().unwrap();
        assert_float_eq(centi as f32 / 100.0, float, 0.02);
    }
}
