//! Unit tests for the acquisition engine, compensation and averaging.
//!
//! The engine is driven by hand-built completions, so every test runs on
//! the host without a bus.

use super::bus::{BusEvent, BusRequest, Command, Target};
use super::compensation::{compensate, raw_code, CalibrationConstants};
use super::protocol::{ProtocolState, SensorEngine, StatusPolicy};
use super::window::TemperatureSampleWindow;
use crate::config::{SENSOR_ADDRESS, TEMPERATURE_SAMPLES};
use crate::error::{Error, SensorError};

const CALIBRATION_BYTES: [u8; 6] = [0x01, 0x6C, 0x2E, 0x69, 0xCF, 0xFD];

fn reference_calibration() -> CalibrationConstants {
    CalibrationConstants {
        t1: 27504,
        t2: 26435,
        t3: -1000,
    }
}

/// Feed the six calibration bytes; returns the request issued after the
/// last one.
fn calibrate(engine: &mut SensorEngine) -> Option<BusRequest> {
    engine.begin();
    let mut request = None;
    for byte in CALIBRATION_BYTES {
        assert_eq!(engine.state(), ProtocolState::ReadCalibration);
        engine.on_bus_event(BusEvent::ack(0));
        assert_eq!(engine.state(), ProtocolState::WriteCalibration);
        request = engine.on_bus_event(BusEvent::ack(byte));
    }
    request
}

/// Run one measurement cycle from `ConfigFinished` with the given burst
/// payload; returns the number of requests issued.
fn measure(engine: &mut SensorEngine, msb: u8, lsb: u8) -> usize {
    // ctrl_meas select, forced-mode byte, status select, status read
    let mut issued = feed(engine, 0) + feed(engine, 0) + feed(engine, 0) + feed(engine, 0x01);
    assert_eq!(engine.state(), ProtocolState::AdcStartReading);
    // data select
    issued += feed(engine, 0);
    assert_eq!(engine.state(), ProtocolState::AdcReadingInProgress);
    for byte in [0x80, 0x00, 0x00, 0x00, msb, lsb] {
        issued += feed(engine, byte);
    }
    issued
}

fn feed(engine: &mut SensorEngine, data: u8) -> usize {
    usize::from(engine.on_bus_event(BusEvent::ack(data)).is_some())
}

fn calibrated_engine() -> SensorEngine {
    let mut engine = SensorEngine::new();
    calibrate(&mut engine);
    engine
}

// ═══════════════════════════════════════════════════════════════════════════
// Calibration
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn begin_selects_first_calibration_register() {
    let mut engine = SensorEngine::new();
    let request = engine.begin().unwrap();
    assert_eq!(
        request.target,
        Some(Target {
            address: SENSOR_ADDRESS,
            read: false
        })
    );
    assert_eq!(request.data, Some(0x88));
    assert_eq!(request.command, Command::SingleSend);
    assert_eq!(engine.begin(), None);
}

#[test]
fn calibration_walks_consecutive_registers() {
    let mut engine = SensorEngine::new();
    engine.begin();
    for offset in 0..6u8 {
        let receive = engine.on_bus_event(BusEvent::ack(0)).unwrap();
        assert_eq!(receive.command, Command::SingleReceive);
        assert!(receive.target.unwrap().read);
        let next = engine
            .on_bus_event(BusEvent::ack(CALIBRATION_BYTES[offset as usize]))
            .unwrap();
        if offset < 5 {
            assert_eq!(next.data, Some(0x89 + offset));
            assert_eq!(next.command, Command::SingleSend);
        } else {
            assert_eq!(next.data, Some(0xF4));
            assert_eq!(next.command, Command::BurstSendStart);
        }
    }
}

#[test]
fn calibration_bytes_are_little_endian() {
    let engine = calibrated_engine();
    let cal = engine.calibration().unwrap();
    assert_eq!(cal.t1, 0x6C01);
    assert_eq!(cal.t2, 0x692E);
    assert_eq!(cal.t3, 0xFDCF_u16 as i16);
    assert_eq!(engine.state(), ProtocolState::ConfigFinished);
}

#[test]
fn calibration_starts_first_conversion() {
    let mut engine = SensorEngine::new();
    let request = calibrate(&mut engine).unwrap();
    assert_eq!(request.command, Command::BurstSendStart);
    // The follow-up carries the forced-mode byte on the same target.
    let finish = engine.on_bus_event(BusEvent::ack(0)).unwrap();
    assert_eq!(finish.target, None);
    assert_eq!(finish.data, Some(0x21));
    assert_eq!(finish.command, Command::BurstSendFinish);
}

// ═══════════════════════════════════════════════════════════════════════════
// Measurement cycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn one_request_per_completion() {
    let mut engine = calibrated_engine();
    // Five setup requests and five burst steps; the sixth byte ends the
    // cycle without a request.
    assert_eq!(measure(&mut engine, 0x66, 0x70), 10);
    assert_eq!(engine.state(), ProtocolState::ConfigFinished);
}

#[test]
fn status_poll_loops_until_ready() {
    let mut engine = calibrated_engine();
    for _ in 0..3 {
        engine.on_bus_event(BusEvent::ack(0));
    }
    assert_eq!(engine.state(), ProtocolState::AdcWaitForMeasureFinish);
    for _ in 0..20 {
        let poll = engine.on_bus_event(BusEvent::ack(0x08)).unwrap();
        assert_eq!(poll.command, Command::SingleReceive);
        assert_eq!(engine.state(), ProtocolState::AdcWaitForMeasureFinish);
    }
    let read = engine.on_bus_event(BusEvent::ack(0x01)).unwrap();
    assert_eq!(read.data, Some(0xF6));
    assert_eq!(engine.state(), ProtocolState::AdcStartReading);
}

#[test]
fn measuring_cleared_policy_waits_for_bit_three() {
    assert!(!StatusPolicy::MeasuringCleared.is_ready(0x08));
    assert!(StatusPolicy::MeasuringCleared.is_ready(0x00));
    assert!(StatusPolicy::MeasuringCleared.is_ready(0x01));
    assert!(!StatusPolicy::Literal.is_ready(0x08));
    assert!(StatusPolicy::Literal.is_ready(0x09));
    assert_eq!(StatusPolicy::default(), StatusPolicy::Literal);
}

#[test]
fn burst_uses_last_two_bytes() {
    let mut engine = calibrated_engine();
    measure(&mut engine, 0x66, 0x70);
    let expected = compensate(raw_code(0x66, 0x70), &engine.calibration().unwrap());
    assert_eq!(engine.last_temperature(), Some(expected));
}

#[test]
fn next_cycle_waits_for_coarse_tick() {
    let mut engine = calibrated_engine();
    assert_eq!(engine.on_coarse_tick(), None);
    measure(&mut engine, 0x66, 0x70);

    // Completions between cycles are ignored.
    assert_eq!(engine.on_bus_event(BusEvent::ack(0)), None);
    assert_eq!(engine.state(), ProtocolState::ConfigFinished);

    let start = engine.on_coarse_tick().unwrap();
    assert_eq!(start.data, Some(0xF4));
    assert_eq!(start.command, Command::BurstSendStart);
    assert_eq!(engine.session().burst_count, 0);
    assert_eq!(engine.on_coarse_tick(), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn nack_at_any_step_is_absorbing() {
    // Covers calibration, setup and the burst read.
    for step in 0..22 {
        let mut engine = SensorEngine::new();
        engine.begin();
        for i in 0..step {
            // Odd completions carry a ready status byte.
            let data = if i % 2 == 1 { 0x01 } else { 0x00 };
            engine.on_bus_event(BusEvent::ack(data));
        }
        assert_eq!(engine.on_bus_event(BusEvent::nack()), None, "step {step}");
        assert!(engine.is_faulted());
        assert_eq!(engine.on_bus_event(BusEvent::ack(0)), None);
        assert_eq!(engine.on_coarse_tick(), None);
        assert_eq!(engine.begin(), None);
        assert_eq!(engine.state(), ProtocolState::Error);
    }
}

#[test]
fn fault_reason_tracks_phase() {
    let mut engine = SensorEngine::new();
    engine.begin();
    engine.on_bus_event(BusEvent::nack());
    assert_eq!(engine.fault(), Some(SensorError::CalibrationNack));

    let mut engine = calibrated_engine();
    assert_eq!(engine.health(), Ok(()));
    engine.on_bus_event(BusEvent::ack(0));
    engine.on_bus_event(BusEvent::nack());
    assert_eq!(engine.fault(), Some(SensorError::MeasurementNack));
    assert_eq!(
        engine.health(),
        Err(Error::SensorFault(SensorError::MeasurementNack))
    );
}

#[test]
fn reset_keeps_calibration() {
    let mut engine = calibrated_engine();
    engine.on_bus_event(BusEvent::nack());
    assert!(engine.is_faulted());

    assert_eq!(engine.reset(), None);
    assert!(!engine.is_faulted());
    assert_eq!(engine.fault(), None);
    assert!(engine.calibration().is_some());
    assert!(engine.on_coarse_tick().is_some());
}

#[test]
fn reset_before_calibration_restarts_it() {
    let mut engine = SensorEngine::new();
    engine.begin();
    engine.on_bus_event(BusEvent::ack(0));
    engine.on_bus_event(BusEvent::nack());

    let request = engine.reset().unwrap();
    assert_eq!(request.data, Some(0x88));
    assert_eq!(engine.state(), ProtocolState::ReadCalibration);
    assert_eq!(engine.session().byte_index, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Compensation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn compensation_matches_fixed_point_reference() {
    let cal = reference_calibration();
    let raw: u32 = 519_888;

    // Integer routine from the datasheet, result in 0.01 °C.
    let adc = raw as i64;
    let t1 = cal.t1 as i64;
    let t2 = cal.t2 as i64;
    let t3 = cal.t3 as i64;
    let var1 = (((adc >> 3) - (t1 << 1)) * t2) >> 11;
    let var2 = (((((adc >> 4) - t1) * ((adc >> 4) - t1)) >> 12) * t3) >> 14;
    let reference = ((var1 + var2) * 5 + 128) >> 8;
    let reference = reference as f32 / 100.0 + 3.0;

    let celsius = compensate(raw, &cal);
    assert!((celsius - reference).abs() < 0.1, "{celsius} vs {reference}");
}

#[test]
fn compensation_below_freezing() {
    let celsius = compensate(419_584, &reference_calibration());
    assert!((celsius - -3.4586).abs() < 0.01, "{celsius}");
}

#[test]
fn compensation_is_pure() {
    let cal = reference_calibration();
    let first = compensate(500_000, &cal);
    for _ in 0..5 {
        assert_eq!(compensate(500_000, &cal), first);
    }
}

#[test]
fn compensation_clamps_to_rated_range() {
    let cal = reference_calibration();
    assert_eq!(compensate(0xFFFF0, &cal), 85.0);
    assert_eq!(compensate(0, &cal), -40.0);
}

#[test]
fn raw_code_is_left_aligned() {
    assert_eq!(raw_code(0x66, 0x70), 0x66700);
    assert_eq!(raw_code(0xFF, 0xFF), 0xFFFF0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Sample window
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn window_publishes_on_tenth_sample() {
    let mut window = TemperatureSampleWindow::new();
    for i in 0..TEMPERATURE_SAMPLES - 1 {
        assert_eq!(window.push(i as f32), None);
        assert_eq!(window.average(), None);
    }
    assert_eq!(window.push(9.0), Some(4.5));
    assert_eq!(window.average(), Some(4.5));
    assert_eq!(window.pending(), 0);
}

#[test]
fn average_stays_stale_between_fills() {
    let mut window = TemperatureSampleWindow::new();
    for _ in 0..TEMPERATURE_SAMPLES {
        window.push(20.0);
    }
    for _ in 0..TEMPERATURE_SAMPLES - 1 {
        assert_eq!(window.push(30.0), None);
        assert_eq!(window.average(), Some(20.0));
    }
    assert_eq!(window.push(30.0), Some(30.0));
}

#[test]
fn engine_publishes_after_ten_cycles() {
    let mut engine = calibrated_engine();
    for cycle in 0..TEMPERATURE_SAMPLES {
        if cycle > 0 {
            engine.on_coarse_tick().unwrap();
        }
        measure(&mut engine, 0x66, 0x70);
        if cycle + 1 < TEMPERATURE_SAMPLES {
            assert_eq!(engine.average(), None);
            assert_eq!(engine.take_published(), None);
        }
    }
    let published = engine.take_published().unwrap();
    assert_eq!(Some(published), engine.average());
    assert_eq!(engine.take_published(), None);
}
