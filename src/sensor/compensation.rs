//! Raw ADC code → °C using the factory trim words.

use crate::config::{TEMPERATURE_MAX_C, TEMPERATURE_MIN_C, TEMPERATURE_TRIM_C};

/// Temperature trim words `dig_T1..dig_T3`, read once per boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConstants {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
}

impl CalibrationConstants {
    /// Assemble from registers 0x88..=0x8D, little-endian per word.
    pub fn from_registers(bytes: &[u8; 6]) -> Self {
        Self {
            t1: u16::from_le_bytes([bytes[0], bytes[1]]),
            t2: i16::from_le_bytes([bytes[2], bytes[3]]),
            t3: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }
}

/// Raw code from the temperature MSB/LSB registers.
///
/// The XLSB nibble is not read, so the code is left-aligned to 20 bits.
pub fn raw_code(msb: u8, lsb: u8) -> u32 {
    ((u32::from(msb) << 8) | u32::from(lsb)) << 4
}

/// Floating-point compensation from the BMP280 datasheet, plus the board
/// trim, clamped to the rated range.
pub fn compensate(raw: u32, calibration: &CalibrationConstants) -> f32 {
    let raw = raw as f32;
    let t1 = f32::from(calibration.t1);
    let t2 = f32::from(calibration.t2);
    let t3 = f32::from(calibration.t3);

    let var1 = (raw / 16_384.0 - t1 / 1_024.0) * t2;
    let delta = raw / 131_072.0 - t1 / 8_192.0;
    let var2 = delta * delta * t3;

    ((var1 + var2) / 5_120.0 + TEMPERATURE_TRIM_C).clamp(TEMPERATURE_MIN_C, TEMPERATURE_MAX_C)
}
