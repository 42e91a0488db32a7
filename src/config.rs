//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

use crate::sensor::protocol::StatusPolicy;

// Ticks

/// Fine tick period (ms). Drives button sampling, mode timeouts and redraws.
pub const FINE_TICK_MS: u64 = 10;

/// Coarse tick period (ms). Starts the next sensor acquisition cycle.
pub const COARSE_TICK_MS: u64 = 100;

/// Wall-clock tick period (ms).
pub const CLOCK_TICK_MS: u64 = 1000;

// Buttons
//
// Durations below are counted in fine ticks (10 ms each).

/// Minimum held duration before a release is accepted (≈10 ms).
pub const DEBOUNCE_TICKS: u16 = 1;

/// ShowTemperature → ShowClock: 10 ms ..= 900 ms.
pub const SHOW_CLOCK_PRESS_MIN: u16 = 1;
pub const SHOW_CLOCK_PRESS_MAX: u16 = 90;

/// ShowTemperature → EditHours: 1000 ms ..= 3000 ms.
pub const EDIT_PRESS_MIN: u16 = 100;
pub const EDIT_PRESS_MAX: u16 = 300;

/// Edit-mode advance and digit increment: 10 ms ..= 500 ms.
pub const FIELD_PRESS_MIN: u16 = 1;
pub const FIELD_PRESS_MAX: u16 = 50;

/// ShowClock falls back to ShowTemperature after this many ticks (3 s).
pub const SHOW_CLOCK_TIMEOUT_TICKS: u16 = 300;

/// Full blink period of the field under edit (1 s); blank for the second half.
pub const BLINK_PERIOD_TICKS: u16 = 100;

// Clock

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;
pub const SECONDS_PER_MINUTE: u8 = 60;

/// Time shown after power-up, before the user sets the clock.
pub const BOOT_TIME: (u8, u8, u8) = (23, 59, 59);

/// Hours at or above this value render as PM on the 12-hour display.
pub const PM_HOUR_THRESHOLD: u8 = 13;

// Sensor (BMP280 on I²C)

/// 7-bit bus address with SDO tied low.
pub const SENSOR_ADDRESS: u8 = 0x76;

/// First calibration register (dig_T1 LSB); six consecutive bytes follow.
pub const CALIBRATION_START_REGISTER: u8 = 0x88;

pub const REGISTER_STATUS: u8 = 0xF3;
pub const REGISTER_CTRL_MEAS: u8 = 0xF4;

/// Burst reads start one register below the pressure block, so the
/// temperature MSB/LSB arrive as bytes 5 and 6.
pub const BURST_START_REGISTER: u8 = 0xF6;

/// Bytes clocked out per burst read (0xF6..=0xFB).
pub const BURST_READ_LEN: usize = 6;

/// Calibration bytes read one register at a time (dig_T1..dig_T3).
pub const CALIBRATION_LEN: usize = 6;

/// Forced mode, temperature oversampling ×1, pressure skipped.
pub const CTRL_MEAS_FORCED_T1: u8 = 0x01 | 0x20;

/// How the status byte is tested for "conversion finished".
///
/// `Literal` reproduces the shipped firmware's check, which only tests
/// bit 0 because of an operator-precedence slip; on real parts that bit
/// is the NVM-copy flag and the poll rarely completes. The firmware
/// therefore waits for the `measuring` bit to clear instead.
pub const SENSOR_STATUS_POLICY: StatusPolicy = StatusPolicy::MeasuringCleared;

/// Fixed trim added to every compensated reading (°C).
pub const TEMPERATURE_TRIM_C: f32 = 3.0;

/// Compensated readings are clamped to the sensor's rated range (°C).
pub const TEMPERATURE_MIN_C: f32 = -40.0;
pub const TEMPERATURE_MAX_C: f32 = 85.0;

/// Number of readings averaged into the published temperature.
pub const TEMPERATURE_SAMPLES: usize = 10;

// Serial report

pub const UART_BAUD: u32 = 115_200;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button MODE    → P0.11 (Button 1)
//   Button SET     → P0.12 (Button 2)
//   Fault LED      → P0.14 (LED 2, active low)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   MAX7219 CLK    → P0.29
//   MAX7219 DIN    → P0.30
//   MAX7219 LOAD   → P0.31
//   UART TX        → P0.06
//   UART RX        → P0.08
