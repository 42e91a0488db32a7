//! Wall-clock time kept in software.
//!
//! Advanced by the 1 Hz tick; the edit modes bump hours and minutes in
//! place through [`ClockTime::increment`].

use crate::config::{BOOT_TIME, HOURS_PER_DAY, MINUTES_PER_HOUR, SECONDS_PER_MINUTE};

/// Field of [`ClockTime`] the user can edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hours,
    Minutes,
}

impl Field {
    /// Value at which the field wraps back to zero.
    pub const fn modulus(self) -> u8 {
        match self {
            Field::Hours => HOURS_PER_DAY,
            Field::Minutes => MINUTES_PER_HOUR,
        }
    }
}

/// 24-hour time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    /// 0..=23
    pub hours: u8,
    /// 0..=59
    pub minutes: u8,
    /// 0..=59
    pub seconds: u8,
}

impl Default for ClockTime {
    fn default() -> Self {
        Self::boot()
    }
}

impl ClockTime {
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Time shown after power-up.
    pub const fn boot() -> Self {
        Self::new(BOOT_TIME.0, BOOT_TIME.1, BOOT_TIME.2)
    }

    /// Advance by one second, carrying into minutes and hours.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds >= SECONDS_PER_MINUTE {
            self.seconds = 0;
            self.minutes += 1;
            if self.minutes >= MINUTES_PER_HOUR {
                self.minutes = 0;
                self.hours += 1;
                if self.hours >= HOURS_PER_DAY {
                    self.hours = 0;
                }
            }
        }
    }

    /// Add one to `field`, wrapping 24→0 for hours and 60→0 for minutes.
    /// Seconds are untouched; no carry into the neighbouring field.
    pub fn increment(&mut self, field: Field) {
        let slot = match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
        };
        *slot += 1;
        if *slot >= field.modulus() {
            *slot = 0;
        }
    }
}
