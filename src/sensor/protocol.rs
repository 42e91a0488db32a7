//! Sensor acquisition protocol.
//!
//! ```text
//!  begin ──► ReadCalibration ◄──► WriteCalibration ──(6 bytes)──┐
//!                                                                ▼
//!  coarse tick ─────────────────────────────────────────► ConfigFinished
//!                                                                │
//!  AdcStatusConfig ◄─────────────────────────────────────────────┘
//!        │
//!        ▼
//!  AdcStatus ──► AdcWaitForMeasureFinish ⟲ (not ready)
//!                        │ ready
//!                        ▼
//!               AdcStartReading ──► AdcReadingInProgress ⟲ (6 bytes)
//!                                            │
//!                                            ▼
//!                                  ConfigFinished (awaiting tick)
//! ```
//!
//! Every transition is driven by exactly one completion and yields at most
//! one [`BusRequest`]. A NACK anywhere moves to `Error`, which only
//! [`SensorEngine::reset`] leaves.

use super::bus::{BusEvent, BusRequest, Command};
use super::compensation::{compensate, raw_code, CalibrationConstants};
use super::window::TemperatureSampleWindow;
use crate::config::{
    BURST_READ_LEN, BURST_START_REGISTER, CALIBRATION_LEN, CALIBRATION_START_REGISTER,
    CTRL_MEAS_FORCED_T1, REGISTER_CTRL_MEAS, REGISTER_STATUS, SENSOR_ADDRESS,
};
use crate::error::{Result, SensorError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolState {
    /// Calibration register pointer is being written.
    #[default]
    ReadCalibration,
    /// One calibration byte is being read back.
    WriteCalibration,
    /// `ctrl_meas` selected, or idle between cycles.
    ConfigFinished,
    /// Forced-mode byte is being written.
    AdcStatusConfig,
    /// Status register pointer is being written.
    AdcStatus,
    /// Status byte read back; polled until the conversion finishes.
    AdcWaitForMeasureFinish,
    /// Data register pointer is being written.
    AdcStartReading,
    /// Burst read of the data block.
    AdcReadingInProgress,
    Error,
}

/// How the status byte is interpreted as "conversion finished".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusPolicy {
    /// Bit 0 set. The check the first board revision shipped with.
    #[default]
    Literal,
    /// `measuring` (bit 3) clear.
    MeasuringCleared,
}

impl StatusPolicy {
    const MEASURING: u8 = 0x08;
    const LITERAL_MASK: u8 = 0x01;

    pub const fn is_ready(self, status: u8) -> bool {
        match self {
            StatusPolicy::Literal => status & Self::LITERAL_MASK != 0,
            StatusPolicy::MeasuringCleared => status & Self::MEASURING == 0,
        }
    }
}

/// Per-cycle scratch state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSession {
    pub state: ProtocolState,
    /// Calibration register offset, 0..6.
    pub byte_index: u8,
    pub scratch: [u8; BURST_READ_LEN],
    /// Bytes received in the current burst read.
    pub burst_count: u8,
}

impl SensorSession {
    pub const fn new() -> Self {
        Self {
            state: ProtocolState::ReadCalibration,
            byte_index: 0,
            scratch: [0; BURST_READ_LEN],
            burst_count: 0,
        }
    }

    /// Fresh scratch for a new acquisition cycle.
    const fn cycle() -> Self {
        Self {
            state: ProtocolState::ConfigFinished,
            ..Self::new()
        }
    }
}

/// The acquisition engine plus everything it produces.
#[derive(Clone, Copy, Debug)]
pub struct SensorEngine {
    session: SensorSession,
    calibration: Option<CalibrationConstants>,
    window: TemperatureSampleWindow,
    policy: StatusPolicy,
    begun: bool,
    awaiting_tick: bool,
    last_temperature: Option<f32>,
    published: Option<f32>,
    fault: Option<SensorError>,
}

impl Default for SensorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorEngine {
    pub const fn new() -> Self {
        Self::with_policy(StatusPolicy::Literal)
    }

    pub const fn with_policy(policy: StatusPolicy) -> Self {
        Self {
            session: SensorSession::new(),
            calibration: None,
            window: TemperatureSampleWindow::new(),
            policy,
            begun: false,
            awaiting_tick: false,
            last_temperature: None,
            published: None,
            fault: None,
        }
    }

    /// Select the first calibration register. Only answers once, before
    /// calibration has been read.
    pub fn begin(&mut self) -> Option<BusRequest> {
        if self.begun
            || self.calibration.is_some()
            || self.session.state != ProtocolState::ReadCalibration
        {
            return None;
        }
        self.begun = true;
        self.session = SensorSession::new();
        Some(Self::select(CALIBRATION_START_REGISTER))
    }

    /// Advance on one bus completion.
    pub fn on_bus_event(&mut self, event: BusEvent) -> Option<BusRequest> {
        let state = self.session.state;
        if state == ProtocolState::Error {
            return None;
        }
        if state == ProtocolState::ConfigFinished && self.awaiting_tick {
            // Stray completion between cycles.
            return None;
        }
        if event.status.nack {
            self.fail(state);
            return None;
        }

        match state {
            ProtocolState::ReadCalibration => {
                self.session.state = ProtocolState::WriteCalibration;
                Some(Self::receive())
            }
            ProtocolState::WriteCalibration => self.store_calibration_byte(event.data),
            ProtocolState::ConfigFinished => {
                self.session.state = ProtocolState::AdcStatusConfig;
                Some(BusRequest::follow_up(
                    Some(CTRL_MEAS_FORCED_T1),
                    Command::BurstSendFinish,
                ))
            }
            ProtocolState::AdcStatusConfig => {
                self.session.state = ProtocolState::AdcStatus;
                Some(Self::select(REGISTER_STATUS))
            }
            ProtocolState::AdcStatus => {
                self.session.state = ProtocolState::AdcWaitForMeasureFinish;
                Some(Self::receive())
            }
            ProtocolState::AdcWaitForMeasureFinish => {
                if self.policy.is_ready(event.data) {
                    self.session.state = ProtocolState::AdcStartReading;
                    Some(Self::select(BURST_START_REGISTER))
                } else {
                    Some(Self::receive())
                }
            }
            ProtocolState::AdcStartReading => {
                self.session.state = ProtocolState::AdcReadingInProgress;
                self.session.burst_count = 0;
                Some(BusRequest::read(SENSOR_ADDRESS, Command::BurstReceiveStart))
            }
            ProtocolState::AdcReadingInProgress => self.store_burst_byte(event.data),
            ProtocolState::Error => None,
        }
    }

    /// Start the next forced conversion if the previous cycle is done.
    pub fn on_coarse_tick(&mut self) -> Option<BusRequest> {
        if self.session.state != ProtocolState::ConfigFinished || !self.awaiting_tick {
            return None;
        }
        self.awaiting_tick = false;
        self.session = SensorSession::cycle();
        Some(BusRequest::write(
            SENSOR_ADDRESS,
            REGISTER_CTRL_MEAS,
            Command::BurstSendStart,
        ))
    }

    /// Leave `Error`. With calibration already read the engine waits for the
    /// next coarse tick; otherwise calibration restarts and its first
    /// request is returned.
    pub fn reset(&mut self) -> Option<BusRequest> {
        self.fault = None;
        if self.calibration.is_some() {
            self.session = SensorSession::cycle();
            self.awaiting_tick = true;
            None
        } else {
            self.session = SensorSession::new();
            self.awaiting_tick = false;
            self.begun = false;
            self.begin()
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.session.state == ProtocolState::Error
    }

    pub fn fault(&self) -> Option<SensorError> {
        self.fault
    }

    /// `Err(SensorFault)` while the engine sits in `Error`.
    pub fn health(&self) -> Result<()> {
        match self.fault {
            Some(reason) => Err(reason.into()),
            None => Ok(()),
        }
    }

    pub fn state(&self) -> ProtocolState {
        self.session.state
    }

    pub fn session(&self) -> &SensorSession {
        &self.session
    }

    pub fn calibration(&self) -> Option<CalibrationConstants> {
        self.calibration
    }

    /// Published average; `None` until the first window fill.
    pub fn average(&self) -> Option<f32> {
        self.window.average()
    }

    /// Most recent compensated reading.
    pub fn last_temperature(&self) -> Option<f32> {
        self.last_temperature
    }

    /// Average published since the last call, if any.
    pub fn take_published(&mut self) -> Option<f32> {
        self.published.take()
    }

    fn select(register: u8) -> BusRequest {
        BusRequest::write(SENSOR_ADDRESS, register, Command::SingleSend)
    }

    fn receive() -> BusRequest {
        BusRequest::read(SENSOR_ADDRESS, Command::SingleReceive)
    }

    fn fail(&mut self, state: ProtocolState) {
        let error = match state {
            ProtocolState::ReadCalibration | ProtocolState::WriteCalibration => {
                SensorError::CalibrationNack
            }
            _ => SensorError::MeasurementNack,
        };
        self.session.state = ProtocolState::Error;
        self.fault = Some(error);
    }

    fn store_calibration_byte(&mut self, byte: u8) -> Option<BusRequest> {
        let index = usize::from(self.session.byte_index);
        self.session.scratch[index] = byte;

        if index + 1 < CALIBRATION_LEN {
            self.session.byte_index += 1;
            self.session.state = ProtocolState::ReadCalibration;
            return Some(Self::select(
                CALIBRATION_START_REGISTER + self.session.byte_index,
            ));
        }

        self.calibration = Some(CalibrationConstants::from_registers(&self.session.scratch));
        self.session = SensorSession::cycle();
        Some(BusRequest::write(
            SENSOR_ADDRESS,
            REGISTER_CTRL_MEAS,
            Command::BurstSendStart,
        ))
    }

    fn store_burst_byte(&mut self, byte: u8) -> Option<BusRequest> {
        let index = usize::from(self.session.burst_count);
        self.session.scratch[index] = byte;
        self.session.burst_count += 1;

        let received = usize::from(self.session.burst_count);
        if received + 1 < BURST_READ_LEN {
            return Some(BusRequest::follow_up(None, Command::BurstReceiveContinue));
        }
        if received < BURST_READ_LEN {
            return Some(BusRequest::follow_up(None, Command::BurstReceiveFinish));
        }

        let msb = self.session.scratch[BURST_READ_LEN - 2];
        let lsb = self.session.scratch[BURST_READ_LEN - 1];
        if let Some(calibration) = self.calibration {
            let celsius = compensate(raw_code(msb, lsb), &calibration);
            self.last_temperature = Some(celsius);
            if let Some(average) = self.window.push(celsius) {
                self.published = Some(average);
            }
        }
        self.session.state = ProtocolState::ConfigFinished;
        self.awaiting_tick = true;
        None
    }
}
