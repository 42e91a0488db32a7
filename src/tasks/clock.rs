//! 1 s tick: wall clock and the serial temperature report on UARTE0.

use defmt::{debug, warn};
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::Uarte;
use embassy_time::{Duration, Ticker};
use thermoclock::config::CLOCK_TICK_MS;
use thermoclock::{Error, Result};

use super::with_state;

#[embassy_executor::task]
pub async fn clock_task(mut uart: Uarte<'static, UARTE0>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(CLOCK_TICK_MS));

    loop {
        ticker.next().await;

        let (line, time) = with_state(|state| (state.on_second(), state.clock()));
        debug!("Clock: {}", time);

        let sent: Result<()> = match line {
            Ok(line) => uart.write(line.as_bytes()).await.map_err(|_| Error::Serial),
            Err(e) => Err(e),
        };
        if let Err(e) = sent {
            warn!("Report: {}", e);
        }
    }
}
