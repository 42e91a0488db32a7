//! Seven-segment frame rendering.
//!
//! The MAX7219 runs in no-decode mode, so every digit is a raw segment
//! byte: bit 7 = decimal point, bits 6..0 = segments A..G. Digit 0 is the
//! rightmost position on the board.
//!
//! ```text
//! temperature:  [-][2][3.][4][°][C]      digits 5..0
//! time:       [1][2.][3][4][°][h]        digits 6..0, ° marks PM
//! ```

use super::Mode;
use crate::clock::{ClockTime, Field};
use crate::config::{BLINK_PERIOD_TICKS, PM_HOUR_THRESHOLD};

/// Number of digit positions driven by the MAX7219.
pub const DIGITS: usize = 8;

/// Segment patterns for 0-9.
pub const NUMERALS: [u8; 10] = [
    0b0111_1110,
    0b0011_0000,
    0b0110_1101,
    0b0111_1001,
    0b0011_0011,
    0b0101_1011,
    0b0101_1111,
    0b0111_0000,
    0b0111_1111,
    0b0111_0011,
];

pub const LETTER_C: u8 = 0b0100_1110;
pub const LETTER_H: u8 = 0b0001_0111;
pub const DEGREE: u8 = 0b0110_0011;
pub const MINUS: u8 = 0b0000_0001;
pub const DECIMAL_POINT: u8 = 0b1000_0000;

/// Position of the first value digit and of the digit carrying the
/// decimal point in the temperature layout.
const TEMPERATURE_FIRST_DIGIT: usize = 2;
const TEMPERATURE_POINT_DIGIT: usize = 3;

/// One full set of digit patterns; blank positions are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; DIGITS]);

impl Frame {
    pub const fn blank() -> Self {
        Self([0; DIGITS])
    }

    pub fn digits(&self) -> &[u8; DIGITS] {
        &self.0
    }

    pub fn digit(&self, position: usize) -> u8 {
        self.0.get(position).copied().unwrap_or(0)
    }

    fn set(&mut self, position: usize, pattern: u8) {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = pattern;
        }
    }
}

/// Temperature with one decimal, `C` and a degree sign.
///
/// The value is truncated (not rounded) to tenths. At least `d.d` is
/// always shown; a minus sign follows the most significant digit.
pub fn render_temperature(celsius: f32) -> Frame {
    let mut frame = Frame::blank();
    frame.set(0, LETTER_C);
    frame.set(1, DEGREE);

    let tenths = (celsius * 10.0) as i32;
    let mut remaining = tenths.unsigned_abs();
    let mut position = TEMPERATURE_FIRST_DIGIT;
    loop {
        let mut pattern = NUMERALS[(remaining % 10) as usize];
        if position == TEMPERATURE_POINT_DIGIT {
            pattern |= DECIMAL_POINT;
        }
        frame.set(position, pattern);
        remaining /= 10;
        position += 1;

        let more_digits = remaining > 0 && position < DIGITS;
        if !more_digits && position > TEMPERATURE_POINT_DIGIT {
            break;
        }
    }

    if celsius < 0.0 {
        frame.set(position, MINUS);
    }
    frame
}

/// 12-hour `h.mm` with an `h` suffix; `blank` hides one field.
///
/// Hours at or above 13 show as `hours - 12` with the PM marker, so noon
/// reads `12` and midnight reads `0`. The hour tens digit is suppressed
/// when zero.
pub fn render_time(time: &ClockTime, blank: Option<Field>) -> Frame {
    let mut frame = Frame::blank();
    frame.set(0, LETTER_H);

    let pm = time.hours >= PM_HOUR_THRESHOLD;
    if pm {
        frame.set(1, DEGREE);
    }

    if blank != Some(Field::Minutes) {
        let minutes = time.minutes % 60;
        frame.set(3, NUMERALS[(minutes % 10) as usize]);
        frame.set(4, NUMERALS[(minutes / 10) as usize]);
    }

    if blank != Some(Field::Hours) {
        let hours = if pm { time.hours - 12 } else { time.hours % 24 };
        frame.set(5, NUMERALS[(hours % 10) as usize] | DECIMAL_POINT);
        if hours / 10 > 0 {
            frame.set(6, NUMERALS[(hours / 10 % 10) as usize]);
        }
    }
    frame
}

/// Per-mode frame selection, including the edit-mode blink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct View {
    blink_ticks: u16,
}

impl View {
    pub const fn new() -> Self {
        Self { blink_ticks: 0 }
    }

    /// Frame for this fine tick, or `None` to leave the display as is.
    ///
    /// In the edit modes the edited field is visible for the first half
    /// of each blink period and blank for the second; the tick that wraps
    /// the period does not redraw. The blink counter is shared by both
    /// edit modes and is not reset on entry.
    pub fn frame(&mut self, mode: Mode, time: &ClockTime, average: Option<f32>) -> Option<Frame> {
        match mode {
            Mode::ShowTemperature => Some(render_temperature(average.unwrap_or(0.0))),
            Mode::ShowClock => Some(render_time(time, None)),
            Mode::EditHours | Mode::EditMinutes => {
                self.blink_ticks += 1;
                if self.blink_ticks >= BLINK_PERIOD_TICKS {
                    self.blink_ticks = 0;
                    None
                } else if self.blink_ticks >= BLINK_PERIOD_TICKS / 2 {
                    Some(render_time(time, mode.editing()))
                } else {
                    Some(render_time(time, None))
                }
            }
        }
    }
}
