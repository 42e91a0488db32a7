//! Coarse tick: BMP280 acquisition over TWIM0.
//!
//! The engine hands out one request at a time. The blocking bus completes
//! each request immediately, so the task feeds the completion straight
//! back and yields between steps to keep the fine tick on time.

use defmt::{error, info, warn};
use embassy_futures::yield_now;
use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;
use embassy_time::{Duration, Ticker};
use thermoclock::config::COARSE_TICK_MS;
use thermoclock::sensor::{issue, I2cBus};

use super::with_state;

pub type SensorBus = I2cBus<Twim<'static, TWISPI0>>;

#[embassy_executor::task]
pub async fn sensor_task(mut bus: SensorBus, mut fault_led: Output<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(COARSE_TICK_MS));
    let mut pending = with_state(|state| state.sensor_mut().begin());
    info!("Sensor: reading calibration");

    loop {
        while let Some(request) = pending.take() {
            let event = issue(&mut bus, &request);
            if event.status.nack {
                warn!("Sensor: {} failed: {}", request.command, bus.last_error());
            }

            let (next, published) = with_state(|state| {
                let next = state.on_bus_event(event);
                (next, state.sensor_mut().take_published())
            });
            pending = next;

            if let Some(average) = published {
                info!("Sensor: average {} °C", average);
            }
            yield_now().await;
        }

        match with_state(|state| state.sensor().health()) {
            Err(e) if fault_led.is_set_high() => {
                error!("Sensor: stopped: {}", e);
                fault_led.set_low();
            }
            Err(_) => {}
            Ok(()) => fault_led.set_high(),
        }

        ticker.next().await;
        pending = with_state(|state| state.on_coarse_tick());
    }
}
