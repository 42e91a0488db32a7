//! BMP280 temperature acquisition.
//!
//! The engine in [`protocol`] is a pure state machine: it is told what the
//! bus did and answers with the next request. [`bus`] applies requests to
//! real hardware; [`compensation`] and [`window`] turn raw codes into the
//! published average.

pub mod bus;
pub mod compensation;
pub mod protocol;
pub mod window;

#[cfg(test)]
mod tests;

pub use bus::{issue, BusEvent, BusRequest, BusStatus, Command, I2cBus, RegisterBus, Target};
pub use compensation::{compensate, CalibrationConstants};
pub use protocol::{ProtocolState, SensorEngine, StatusPolicy};
pub use window::TemperatureSampleWindow;
