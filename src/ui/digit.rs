//! SET button: increments the field under edit.
//!
//! Runs its own press detector so the two buttons never share hold
//! state. Only a 1 ..= 50 tick press counts; mode changes stay with the
//! MODE button even though the duration bands overlap.

use super::press::PressDetector;
use super::PinLevel;
use crate::clock::{ClockTime, Field};
use crate::config::{FIELD_PRESS_MAX, FIELD_PRESS_MIN};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitIncrementer {
    detector: PressDetector,
}

impl DigitIncrementer {
    pub const fn new() -> Self {
        Self {
            detector: PressDetector::new(),
        }
    }

    /// Sample the SET pin for one fine tick. Returns `true` when `field`
    /// of `time` was incremented.
    pub fn on_fine_tick(&mut self, level: PinLevel, field: Field, time: &mut ClockTime) -> bool {
        match self.detector.sample(level) {
            Some(held) if (FIELD_PRESS_MIN..=FIELD_PRESS_MAX).contains(&held) => {
                time.increment(field);
                true
            }
            _ => false,
        }
    }
}
