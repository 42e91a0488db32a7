//! Library interface for thermoclock.
//!
//! Everything with decision logic lives here and builds on the host: the
//! button and mode state machines, the sensor protocol engine, compensation
//! and averaging, frame rendering and the serial report. The MAX7219 and
//! I²C adapters are written against `embedded-hal` traits so they can be
//! tested with mocks.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod report;
pub mod sensor;
pub mod state;
pub mod ui;

pub use error::{Error, Result};
pub use state::SystemState;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
