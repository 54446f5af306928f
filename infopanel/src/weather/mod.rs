//! Weather service
//!
//! A background thread polls OpenWeatherMap and stores the result in a
//! [`WeatherCache`]; the scheduler reads the cache while drawing, so a
//! slow network never holds the display lock.

pub mod client;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use log::{debug, warn};

use infopanel_core::traits::{WeatherError, WeatherProvider, WeatherSnapshot};

pub use client::OpenWeatherClient;

#[derive(Debug)]
struct CacheEntry {
    /// Most recent successful snapshot
    snapshot: Option<WeatherSnapshot>,
    /// Why there is no snapshot (or why the last refresh failed)
    last_error: WeatherError,
}

/// Last known weather, shared between the poller and the scheduler
pub struct WeatherCache {
    entry: Mutex<CriticalSectionRawMutex, RefCell<CacheEntry>>,
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherCache {
    /// Empty cache; reads report [`WeatherError::NotConfigured`]
    pub const fn new() -> Self {
        Self {
            entry: Mutex::new(RefCell::new(CacheEntry {
                snapshot: None,
                last_error: WeatherError::NotConfigured,
            })),
        }
    }

    /// Record a fetch result
    ///
    /// A failure keeps the previous snapshot.
    pub fn store(&self, result: Result<WeatherSnapshot, WeatherError>) {
        self.entry.lock(|entry| {
            let mut entry = entry.borrow_mut();
            match result {
                Ok(snapshot) => entry.snapshot = Some(snapshot),
                Err(e) => entry.last_error = e,
            }
        });
    }
}

impl WeatherProvider for WeatherCache {
    fn get_weather(&self) -> Result<WeatherSnapshot, WeatherError> {
        self.entry.lock(|entry| {
            let entry = entry.borrow();
            entry
                .snapshot
                .clone()
                .ok_or_else(|| entry.last_error.clone())
        })
    }
}

/// Fetch once and update the cache
pub fn refresh(client: &OpenWeatherClient, cache: &WeatherCache) {
    let result = client.fetch();
    match &result {
        Ok(snapshot) => debug!(
            "Weather for {}: {:.1}C, {}",
            snapshot.city, snapshot.temperature_c, snapshot.description
        ),
        Err(e) => warn!("Weather refresh failed: {}", e),
    }
    cache.store(result);
}
