//! MODE button decoding and display-mode navigation.
//!
//! | From            | Hold (10 ms ticks) | Action     | To              |
//! |-----------------|--------------------|------------|-----------------|
//! | ShowTemperature | 1 ..= 90           | Short      | ShowClock       |
//! | ShowTemperature | 100 ..= 300        | Long       | EditHours       |
//! | EditHours       | 1 ..= 50           | VeryShort  | EditMinutes     |
//! | EditMinutes     | 1 ..= 50           | VeryShort  | ShowTemperature |
//!
//! Rows are checked in order and the first match wins. Every other
//! (mode, duration) pair leaves the mode alone. ShowClock expires back to
//! ShowTemperature after [`SHOW_CLOCK_TIMEOUT_TICKS`].

use super::press::PressDetector;
use super::{Mode, PinLevel};
use crate::config::{
    EDIT_PRESS_MAX, EDIT_PRESS_MIN, FIELD_PRESS_MAX, FIELD_PRESS_MIN, SHOW_CLOCK_PRESS_MAX,
    SHOW_CLOCK_PRESS_MIN, SHOW_CLOCK_TIMEOUT_TICKS,
};

/// Classification of one completed press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressAction {
    None,
    ShortDurationEvent,
    LongDurationEvent,
    VeryShortDurationEvent,
}

/// Decide what a press of `held_ticks` means in `mode`.
pub fn classify(mode: Mode, held_ticks: u16) -> PressAction {
    let within = |min: u16, max: u16| (min..=max).contains(&held_ticks);
    match mode {
        Mode::ShowTemperature if within(SHOW_CLOCK_PRESS_MIN, SHOW_CLOCK_PRESS_MAX) => {
            PressAction::ShortDurationEvent
        }
        Mode::ShowTemperature if within(EDIT_PRESS_MIN, EDIT_PRESS_MAX) => {
            PressAction::LongDurationEvent
        }
        Mode::EditHours | Mode::EditMinutes if within(FIELD_PRESS_MIN, FIELD_PRESS_MAX) => {
            PressAction::VeryShortDurationEvent
        }
        _ => PressAction::None,
    }
}

impl Mode {
    /// Transition for `action`; identity when no row applies.
    pub fn after(self, action: PressAction) -> Mode {
        match (self, action) {
            (Mode::ShowTemperature, PressAction::ShortDurationEvent) => Mode::ShowClock,
            (Mode::ShowTemperature, PressAction::LongDurationEvent) => Mode::EditHours,
            (Mode::EditHours, PressAction::VeryShortDurationEvent) => Mode::EditMinutes,
            (Mode::EditMinutes, PressAction::VeryShortDurationEvent) => Mode::ShowTemperature,
            (mode, _) => mode,
        }
    }
}

/// Owns the current mode and the ShowClock expiry counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeNavigator {
    mode: Mode,
    display_ticks: u16,
}

impl ModeNavigator {
    pub const fn new() -> Self {
        Self {
            mode: Mode::ShowTemperature,
            display_ticks: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advance one fine tick. `completed` is the hold time of a MODE press
    /// that finished on this tick, if any.
    pub fn on_fine_tick(&mut self, completed: Option<u16>) -> Mode {
        if let Some(held) = completed {
            self.mode = self.mode.after(classify(self.mode, held));
        }

        if self.mode == Mode::ShowClock {
            self.display_ticks += 1;
            if self.display_ticks >= SHOW_CLOCK_TIMEOUT_TICKS {
                self.mode = Mode::ShowTemperature;
                self.display_ticks = 0;
            }
        }
        self.mode
    }
}

/// The MODE button: detector plus navigator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModeButton {
    detector: PressDetector,
    navigator: ModeNavigator,
}

impl ModeButton {
    pub const fn new() -> Self {
        Self {
            detector: PressDetector::new(),
            navigator: ModeNavigator::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.navigator.mode()
    }

    pub fn on_fine_tick(&mut self, level: PinLevel) -> Mode {
        let completed = self.detector.sample(level);
        self.navigator.on_fine_tick(completed)
    }
}
