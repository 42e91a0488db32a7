//! User interface subsystem - two push-buttons and a seven-segment display.
//!
//! Everything here is pure and driven by the 10 ms fine tick; the
//! embedded tasks only sample pins and push frames to the MAX7219.
//!
//! ## Components
//!
//! - **Press detector**: debounces one pin and measures the hold time
//! - **Mode navigator**: MODE button hold time → display/edit mode
//! - **Digit incrementer**: SET button → +1 on the field under edit
//! - **Segments**: mode + time + temperature → digit patterns

pub mod digit;
pub mod mode;
pub mod press;
pub mod segments;

use crate::clock::Field;

/// What the display shows and which button gestures are live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Idle - shows the averaged temperature.
    #[default]
    ShowTemperature,
    /// Shows hh:mm for a few seconds, then falls back to the temperature.
    ShowClock,
    /// Hours blink; SET increments them.
    EditHours,
    /// Minutes blink; SET increments them.
    EditMinutes,
}

impl Mode {
    /// Field under edit, if any.
    pub const fn editing(self) -> Option<Field> {
        match self {
            Mode::EditHours => Some(Field::Hours),
            Mode::EditMinutes => Some(Field::Minutes),
            Mode::ShowTemperature | Mode::ShowClock => None,
        }
    }
}

/// Raw level read from a button pin.
///
/// Buttons are pulled up: idle reads `High`, pressed reads `Low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    High,
    Low,
}

impl PinLevel {
    pub const fn from_is_low(is_low: bool) -> Self {
        if is_low {
            PinLevel::Low
        } else {
            PinLevel::High
        }
    }

    /// True while the button is held down.
    pub const fn is_pressed(self) -> bool {
        matches!(self, PinLevel::Low)
    }
}
