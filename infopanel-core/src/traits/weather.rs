//! Weather provider trait

use alloc::string::String;

/// Current weather at the configured city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// City name as reported by the service
    pub city: String,
    /// Air temperature (°C)
    pub temperature_c: f32,
    /// Perceived temperature (°C)
    pub feels_like_c: f32,
    /// Relative humidity (%)
    pub humidity_pct: u8,
    /// Short human-readable conditions
    pub description: String,
    /// Wind speed (m/s)
    pub wind_speed_ms: f32,
}

/// Errors that can occur while getting the weather
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// No city or API key configured
    #[error("weather service is not configured")]
    NotConfigured,
    /// The service could not deliver a snapshot
    #[error("weather unavailable: {0}")]
    Unavailable(String),
}

/// Trait for weather sources
///
/// Called from the render path while the display lock is held, so
/// implementations should answer from memory rather than the network.
pub trait WeatherProvider {
    /// Get the most recent weather
    fn get_weather(&self) -> Result<WeatherSnapshot, WeatherError>;
}

impl<W: WeatherProvider + ?Sized> WeatherProvider for &W {
    fn get_weather(&self) -> Result<WeatherSnapshot, WeatherError> {
        (**self).get_weather()
    }
}

/// A missing provider reports [`WeatherError::NotConfigured`]
impl<W: WeatherProvider> WeatherProvider for Option<W> {
    fn get_weather(&self) -> Result<WeatherSnapshot, WeatherError> {
        match self {
            Some(provider) => provider.get_weather(),
            None => Err(WeatherError::NotConfigured),
        }
    }
}
