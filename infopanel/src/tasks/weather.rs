//! Weather poller thread

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::info;

use crate::channels::Shutdown;
use crate::weather::{refresh, OpenWeatherClient, WeatherCache};

/// Longest sleep between shutdown checks
const POLL_STEP: Duration = Duration::from_secs(1);

/// Refresh `cache` every `interval` on a background thread
///
/// The first refresh happens one interval after the start; fetch once
/// beforehand for an immediate snapshot.
pub fn spawn_weather_poller(
    client: OpenWeatherClient,
    cache: &'static WeatherCache,
    interval: Duration,
    shutdown: &'static Shutdown,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name("weather".into()).spawn(move || {
        info!("Weather poller started, every {} s", interval.as_secs());
        let mut next = Instant::now() + interval;

        while !shutdown.is_requested() {
            let now = Instant::now();
            if now >= next {
                refresh(&client, cache);
                next = now + interval;
            }
            thread::sleep(POLL_STEP.min(next.saturating_duration_since(now)));
        }
    })
}
