//! thermoclock - clock and temperature display for the nRF52840.
//!
//! Wiring is listed in `config.rs`. Three tick sources drive the system:
//!
//! - 10 ms: buttons, mode navigation, MAX7219 refresh
//! - 100 ms: next BMP280 acquisition cycle
//! - 1 s: wall clock and the serial report

#![no_std]
#![no_main]

mod tasks;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::temp::{self, Temp};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, Uarte};
use embassy_nrf::{bind_interrupts, peripherals};
use embedded_hal_bus::spi::ExclusiveDevice;
use thermoclock::config::{SENSOR_ADDRESS, UART_BAUD};
use thermoclock::display::Max7219;
use thermoclock::sensor::I2cBus;

use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    UARTE0 => uarte::InterruptHandler<peripherals::UARTE0>;
    TEMP => temp::InterruptHandler;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("thermoclock: starting");

    // Buttons: active low, internal pull-up.
    let mode_button = Input::new(p.P0_11, Pull::Up);
    let set_button = Input::new(p.P0_12, Pull::Up);

    // MAX7219: write-only SPI, LOAD latches on the rising edge of CS.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M1;
    let spi = Spim::new_txonly(p.SPI3, Irqs, p.P0_29, p.P0_30, spi_config);
    let load = Output::new(p.P0_31, Level::High, OutputDrive::Standard);
    let device = match ExclusiveDevice::new_no_delay(spi, load) {
        Ok(device) => device,
        Err(never) => match never {},
    };
    let display = Max7219::new(device);

    // BMP280 on TWIM0.
    let mut i2c_config = twim::Config::default();
    i2c_config.sda_pullup = true;
    i2c_config.scl_pullup = true;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let fault_led = Output::new(p.P0_14, Level::High, OutputDrive::Standard);
    info!("Sensor: BMP280 at {=u8:#x}", SENSOR_ADDRESS);

    // Serial report.
    let mut uart_config = uarte::Config::default();
    uart_config.parity = uarte::Parity::EXCLUDED;
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uart_config);
    info!("Report: UARTE0 at {=u32} baud", UART_BAUD);

    let die_temp = Temp::new(p.TEMP, Irqs);

    unwrap!(spawner.spawn(tasks::ui::ui_task(mode_button, set_button, display)));
    unwrap!(spawner.spawn(tasks::sensor::sensor_task(I2cBus::new(i2c), fault_led)));
    unwrap!(spawner.spawn(tasks::clock::clock_task(uart)));
    unwrap!(spawner.spawn(tasks::die_temp::die_temp_task(die_temp)));
}
