//! The single owned record every tick handler works on.
//!
//! The firmware keeps one `SystemState` behind a blocking mutex and hands
//! each task `&mut` access for one step at a time. Host tests drive it
//! directly.

use crate::clock::ClockTime;
use crate::config::SENSOR_STATUS_POLICY;
use crate::error::Result;
use crate::report::{format_line, ReportLine};
use crate::sensor::bus::{BusEvent, BusRequest};
use crate::sensor::protocol::SensorEngine;
use crate::ui::digit::DigitIncrementer;
use crate::ui::mode::ModeButton;
use crate::ui::segments::{Frame, View};
use crate::ui::{Mode, PinLevel};

#[derive(Clone, Copy, Debug)]
pub struct SystemState {
    mode_button: ModeButton,
    digits: DigitIncrementer,
    view: View,
    clock: ClockTime,
    sensor: SensorEngine,
    reports: u32,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemState {
    pub const fn new() -> Self {
        Self {
            mode_button: ModeButton::new(),
            digits: DigitIncrementer::new(),
            view: View::new(),
            clock: ClockTime::boot(),
            sensor: SensorEngine::with_policy(SENSOR_STATUS_POLICY),
            reports: 0,
        }
    }

    /// 10 ms step: sample both buttons, update mode and clock fields,
    /// and return the frame to draw (`None` leaves the display as is).
    pub fn on_fine_tick(&mut self, mode_pin: PinLevel, set_pin: PinLevel) -> Option<Frame> {
        let mode = self.mode_button.on_fine_tick(mode_pin);
        if let Some(field) = mode.editing() {
            self.digits.on_fine_tick(set_pin, field, &mut self.clock);
        }
        self.view.frame(mode, &self.clock, self.sensor.average())
    }

    /// 1 s step: advance the clock and format the next serial report.
    pub fn on_second(&mut self) -> Result<ReportLine> {
        self.clock.tick();
        self.reports = self.reports.wrapping_add(1);
        format_line(self.reports, self.sensor.average().unwrap_or(0.0))
    }

    /// 100 ms step: start the next acquisition if the sensor is idle.
    pub fn on_coarse_tick(&mut self) -> Option<BusRequest> {
        self.sensor.on_coarse_tick()
    }

    pub fn on_bus_event(&mut self, event: BusEvent) -> Option<BusRequest> {
        self.sensor.on_bus_event(event)
    }

    pub fn mode(&self) -> Mode {
        self.mode_button.mode()
    }

    pub fn clock(&self) -> ClockTime {
        self.clock
    }

    pub fn average_temperature(&self) -> Option<f32> {
        self.sensor.average()
    }

    pub fn reports_sent(&self) -> u32 {
        self.reports
    }

    pub fn sensor(&self) -> &SensorEngine {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut SensorEngine {
        &mut self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::segments::{render_temperature, render_time};

    fn press(state: &mut SystemState, mode: PinLevel, set: PinLevel, ticks: u16) {
        for _ in 0..ticks {
            state.on_fine_tick(mode, set);
        }
    }

    #[test]
    fn boots_showing_zero_temperature() {
        let mut state = SystemState::new();
        assert_eq!(
            state.on_fine_tick(PinLevel::High, PinLevel::High),
            Some(render_temperature(0.0))
        );
        assert_eq!(state.mode(), Mode::ShowTemperature);
    }

    #[test]
    fn set_button_is_ignored_outside_edit_modes() {
        let mut state = SystemState::new();
        press(&mut state, PinLevel::High, PinLevel::Low, 10);
        state.on_fine_tick(PinLevel::High, PinLevel::High);
        assert_eq!(state.clock(), ClockTime::boot());
    }

    #[test]
    fn edit_hours_then_minutes() {
        let mut state = SystemState::new();
        press(&mut state, PinLevel::Low, PinLevel::High, 150);
        state.on_fine_tick(PinLevel::High, PinLevel::High);
        assert_eq!(state.mode(), Mode::EditHours);

        press(&mut state, PinLevel::High, PinLevel::Low, 5);
        state.on_fine_tick(PinLevel::High, PinLevel::High);
        assert_eq!(state.clock().hours, 0);

        press(&mut state, PinLevel::Low, PinLevel::High, 5);
        state.on_fine_tick(PinLevel::High, PinLevel::High);
        assert_eq!(state.mode(), Mode::EditMinutes);

        press(&mut state, PinLevel::High, PinLevel::Low, 5);
        state.on_fine_tick(PinLevel::High, PinLevel::High);
        assert_eq!(state.clock().minutes, 0);
        assert_eq!(state.clock().hours, 0);
    }

    #[test]
    fn show_clock_renders_current_time() {
        let mut state = SystemState::new();
        press(&mut state, PinLevel::Low, PinLevel::High, 20);
        let frame = state.on_fine_tick(PinLevel::High, PinLevel::High);
        assert_eq!(state.mode(), Mode::ShowClock);
        assert_eq!(frame, Some(render_time(&ClockTime::boot(), None)));
    }

    #[test]
    fn second_tick_numbers_reports() {
        let mut state = SystemState::new();
        let first = state.on_second().unwrap();
        assert_eq!(first.as_str(), "No. 1 Temperature: 0.0 °C\r\n");
        assert_eq!(state.clock(), ClockTime::new(0, 0, 0));
        let second = state.on_second().unwrap();
        assert!(second.starts_with("No. 2 "));
        assert_eq!(state.reports_sent(), 2);
    }
}
