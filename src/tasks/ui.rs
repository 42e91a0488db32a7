//! Fine tick: button sampling, mode navigation and display refresh.

use defmt::{error, info, warn};
use embassy_nrf::gpio::{Input, Output};
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_time::{Duration, Ticker};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use thermoclock::config::FINE_TICK_MS;
use thermoclock::display::Max7219;
use thermoclock::ui::PinLevel;

use super::with_state;

/// MAX7219 on SPIM3 with LOAD as chip select.
pub type Display = Max7219<ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, NoDelay>>;

#[embassy_executor::task]
pub async fn ui_task(
    mode_button: Input<'static>,
    set_button: Input<'static>,
    mut display: Display,
) -> ! {
    if let Err(e) = display.init() {
        error!("Display: init failed: {}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(FINE_TICK_MS));
    let mut last_mode = with_state(|state| state.mode());
    let mut display_ok = true;

    loop {
        let mode_pin = PinLevel::from_is_low(mode_button.is_low());
        let set_pin = PinLevel::from_is_low(set_button.is_low());

        let (mode, frame) = with_state(|state| {
            let frame = state.on_fine_tick(mode_pin, set_pin);
            (state.mode(), frame)
        });

        if mode != last_mode {
            info!("Mode: {} -> {}", last_mode, mode);
            last_mode = mode;
        }

        if let Some(frame) = frame {
            // Log once per outage, not every tick.
            match display.show(&frame) {
                Ok(()) => display_ok = true,
                Err(e) if display_ok => {
                    warn!("Display: write failed: {}", e);
                    display_ok = false;
                }
                Err(_) => {}
            }
        }

        ticker.next().await;
    }
}
