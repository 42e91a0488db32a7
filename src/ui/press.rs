//! Debounced press/release cycle detection for one button.
//!
//! Sampled once per fine tick. The hold time accumulates while the pin
//! is active; a release only counts once the hold reached the debounce
//! floor, so sub-tick glitches never complete a cycle.

use super::PinLevel;
use crate::config::DEBOUNCE_TICKS;

/// Per-button press state, owned by whichever decoder reads the pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressDetector {
    pressed: bool,
    released: bool,
    held_ticks: u16,
}

impl PressDetector {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            released: false,
            held_ticks: 0,
        }
    }

    /// Feed one pin sample. Returns the hold duration in ticks when a
    /// full press/release cycle completes.
    pub fn sample(&mut self, level: PinLevel) -> Option<u16> {
        if level.is_pressed() {
            self.held_ticks = self.held_ticks.saturating_add(1);
            self.pressed = true;
        } else if self.held_ticks >= DEBOUNCE_TICKS {
            self.released = true;
        }

        if self.pressed && self.released {
            let held = self.held_ticks;
            *self = Self::new();
            Some(held)
        } else {
            None
        }
    }

    /// Ticks accumulated by the press in progress.
    pub fn held_ticks(&self) -> u16 {
        self.held_ticks
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
