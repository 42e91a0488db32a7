//! MAX7219 seven-segment driver.
//!
//! Every write is one 16-bit frame `[register, value]` latched by the LOAD
//! line, which the `SpiDevice` drives as chip select.

use embedded_hal::spi::SpiDevice;

use crate::error::{Error, Result};
use crate::ui::segments::{Frame, DIGITS};

const REG_DIGIT0: u8 = 0x01;
const REG_DECODE_MODE: u8 = 0x09;
const REG_INTENSITY: u8 = 0x0A;
const REG_SCAN_LIMIT: u8 = 0x0B;
const REG_SHUTDOWN: u8 = 0x0C;
const REG_DISPLAY_TEST: u8 = 0x0F;

/// Low brightness; the board runs the module from the DK's 3.3 V rail.
const INTENSITY: u8 = 0x01;

pub struct Max7219<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Max7219<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Raw segments, all eight digits scanned, display on and blank.
    pub fn init(&mut self) -> Result<()> {
        self.write(REG_DISPLAY_TEST, 0)?;
        self.write(REG_INTENSITY, INTENSITY)?;
        self.write(REG_SCAN_LIMIT, (DIGITS - 1) as u8)?;
        self.write(REG_DECODE_MODE, 0)?;
        self.write(REG_SHUTDOWN, 1)?;
        self.clear()
    }

    pub fn show(&mut self, frame: &Frame) -> Result<()> {
        for (position, pattern) in frame.digits().iter().enumerate() {
            self.write(REG_DIGIT0 + position as u8, *pattern)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.show(&Frame::blank())
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    fn write(&mut self, register: u8, value: u8) -> Result<()> {
        self.spi.write(&[register, value]).map_err(|_| Error::Display)
    }
}
