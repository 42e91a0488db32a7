//! Register-bus surface between the sensor engine and the hardware.
//!
//! The engine speaks in single-byte master commands (address, put byte,
//! start command, get byte) and only looks at the NACK flag and the data
//! byte of each completion. [`I2cBus`] maps those commands onto a blocking
//! `embedded_hal::i2c::I2c`, so every command completes before
//! `start_command` returns.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use heapless::Vec;

use crate::config::BURST_READ_LEN;

/// Master command issued after the address and data registers are set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    SingleSend,
    SingleReceive,
    BurstSendStart,
    BurstSendContinue,
    BurstSendFinish,
    BurstReceiveStart,
    BurstReceiveContinue,
    BurstReceiveFinish,
}

/// Slave address plus transfer direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    pub address: u8,
    pub read: bool,
}

/// One step of bus work requested by the engine.
///
/// `target` and `data` are only present when the step changes them; a
/// burst continuation keeps the address set by its start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusRequest {
    pub target: Option<Target>,
    pub data: Option<u8>,
    pub command: Command,
}

impl BusRequest {
    pub const fn write(address: u8, register: u8, command: Command) -> Self {
        Self {
            target: Some(Target {
                address,
                read: false,
            }),
            data: Some(register),
            command,
        }
    }

    pub const fn read(address: u8, command: Command) -> Self {
        Self {
            target: Some(Target {
                address,
                read: true,
            }),
            data: None,
            command,
        }
    }

    /// Continue a transfer on the current target.
    pub const fn follow_up(data: Option<u8>, command: Command) -> Self {
        Self {
            target: None,
            data,
            command,
        }
    }
}

/// Completion flags of the last command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusStatus {
    pub nack: bool,
    pub data_ready: bool,
    pub stop_received: bool,
}

/// What the engine is told after each command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusEvent {
    pub status: BusStatus,
    pub data: u8,
}

impl BusEvent {
    pub const fn ack(data: u8) -> Self {
        Self {
            status: BusStatus {
                nack: false,
                data_ready: true,
                stop_received: false,
            },
            data,
        }
    }

    pub const fn nack() -> Self {
        Self {
            status: BusStatus {
                nack: true,
                data_ready: false,
                stop_received: true,
            },
            data: 0,
        }
    }
}

/// Opaque single-byte master interface.
pub trait RegisterBus {
    fn set_slave_address(&mut self, address: u8, read: bool);
    fn put_byte(&mut self, byte: u8);
    fn start_command(&mut self, command: Command);
    fn get_byte(&mut self) -> u8;
    fn status(&self) -> BusStatus;
}

/// Apply `request` and collect its completion.
pub fn issue<B: RegisterBus + ?Sized>(bus: &mut B, request: &BusRequest) -> BusEvent {
    if let Some(target) = request.target {
        bus.set_slave_address(target.address, target.read);
    }
    if let Some(byte) = request.data {
        bus.put_byte(byte);
    }
    bus.start_command(request.command);
    BusEvent {
        status: bus.status(),
        data: bus.get_byte(),
    }
}

/// [`RegisterBus`] over a blocking I²C master.
///
/// Burst writes are collected and sent as one transaction on
/// `BurstSendFinish`. A burst read fetches all [`BURST_READ_LEN`] bytes on
/// `BurstReceiveStart` and replays them one per continue/finish.
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
    staged: Option<u8>,
    outgoing: Vec<u8, 4>,
    burst: [u8; BURST_READ_LEN],
    burst_pos: usize,
    received: u8,
    status: BusStatus,
    last_error: Option<ErrorKind>,
}

impl<I2C: I2c> I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            staged: None,
            outgoing: Vec::new(),
            burst: [0; BURST_READ_LEN],
            burst_pos: 0,
            received: 0,
            status: BusStatus::default(),
            last_error: None,
        }
    }

    /// Error kind behind the most recent NACK, for logging.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn complete(&mut self, result: Result<(), ErrorKind>, receiving: bool, stop: bool) {
        self.last_error = result.err();
        let nack = self.last_error.is_some();
        self.status = BusStatus {
            nack,
            data_ready: receiving && !nack,
            stop_received: stop || nack,
        };
    }

    fn stage_outgoing(&mut self) -> Result<(), ErrorKind> {
        match self.staged.take() {
            Some(byte) => self.outgoing.push(byte).map_err(|_| ErrorKind::Overrun),
            None => Ok(()),
        }
    }

    fn replay_burst(&mut self) -> Result<(), ErrorKind> {
        let byte = *self.burst.get(self.burst_pos).ok_or(ErrorKind::Overrun)?;
        self.burst_pos += 1;
        self.received = byte;
        Ok(())
    }
}

impl<I2C: I2c> RegisterBus for I2cBus<I2C> {
    fn set_slave_address(&mut self, address: u8, _read: bool) {
        // Direction is implied by the command on a transactional bus.
        self.address = address;
    }

    fn put_byte(&mut self, byte: u8) {
        self.staged = Some(byte);
    }

    fn start_command(&mut self, command: Command) {
        match command {
            Command::SingleSend => {
                let byte = self.staged.take();
                let result = self
                    .i2c
                    .write(self.address, byte.as_slice())
                    .map_err(|e| e.kind());
                self.complete(result, false, true);
            }
            Command::SingleReceive => {
                let mut buf = [0u8; 1];
                let result = self.i2c.read(self.address, &mut buf).map_err(|e| e.kind());
                self.received = buf[0];
                self.complete(result, true, true);
            }
            Command::BurstSendStart => {
                self.outgoing.clear();
                let result = self.stage_outgoing();
                self.complete(result, false, false);
            }
            Command::BurstSendContinue => {
                let result = self.stage_outgoing();
                self.complete(result, false, false);
            }
            Command::BurstSendFinish => {
                let result = self.stage_outgoing().and_then(|()| {
                    self.i2c
                        .write(self.address, &self.outgoing)
                        .map_err(|e| e.kind())
                });
                self.outgoing.clear();
                self.complete(result, false, true);
            }
            Command::BurstReceiveStart => {
                self.burst_pos = 0;
                let result = self
                    .i2c
                    .read(self.address, &mut self.burst)
                    .map_err(|e| e.kind())
                    .and_then(|()| self.replay_burst());
                self.complete(result, true, false);
            }
            Command::BurstReceiveContinue => {
                let result = self.replay_burst();
                self.complete(result, true, false);
            }
            Command::BurstReceiveFinish => {
                let result = self.replay_burst();
                self.complete(result, true, true);
            }
        }
    }

    fn get_byte(&mut self) -> u8 {
        self.received
    }

    fn status(&self) -> BusStatus {
        self.status
    }
}
