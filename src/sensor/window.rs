//! Rolling sample window with a stale average.
//!
//! The average is only recomputed when the window fills; between fills the
//! last published value stays put.

use crate::config::TEMPERATURE_SAMPLES;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureSampleWindow {
    samples: [f32; TEMPERATURE_SAMPLES],
    cursor: usize,
    average: Option<f32>,
}

impl Default for TemperatureSampleWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureSampleWindow {
    pub const fn new() -> Self {
        Self {
            samples: [0.0; TEMPERATURE_SAMPLES],
            cursor: 0,
            average: None,
        }
    }

    /// Store one reading. Returns the new average when this sample filled
    /// the window.
    pub fn push(&mut self, celsius: f32) -> Option<f32> {
        self.samples[self.cursor] = celsius;
        self.cursor += 1;
        if self.cursor < TEMPERATURE_SAMPLES {
            return None;
        }

        self.cursor = 0;
        let sum: f32 = self.samples.iter().sum();
        let average = sum / TEMPERATURE_SAMPLES as f32;
        self.average = Some(average);
        Some(average)
    }

    /// Last published average; `None` until the first fill.
    pub fn average(&self) -> Option<f32> {
        self.average
    }

    /// Samples collected towards the next publication.
    pub fn pending(&self) -> usize {
        self.cursor
    }
}
