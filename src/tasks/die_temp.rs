//! Internal die temperature, logged once per second next to the BMP280
//! reading for comparison.

use defmt::debug;
use embassy_nrf::temp::Temp;
use embassy_time::{Duration, Ticker};
use thermoclock::config::CLOCK_TICK_MS;

#[embassy_executor::task]
pub async fn die_temp_task(mut temp: Temp<'static>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(CLOCK_TICK_MS));

    loop {
        ticker.next().await;
        let value = temp.read().await;
        debug!("Die temperature: {} °C", value.to_num::<f32>());
    }
}
