//! Unified error type for thermoclock.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Display
    /// SPI transfer to the MAX7219 failed.
    Display,

    // Serial
    /// UART write of the temperature report failed.
    Serial,

    // Sensor
    /// The acquisition engine is in its absorbing error state.
    SensorFault(SensorError),

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

/// Why the sensor engine stopped (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The sensor did not acknowledge during calibration readout.
    CalibrationNack,
    /// The sensor did not acknowledge during a measurement cycle.
    MeasurementNack,
}

// Convenience conversions

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::SensorFault(e)
    }
}
