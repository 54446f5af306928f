//! OpenWeatherMap client

use std::time::Duration;

use log::trace;
use serde::Deserialize;

use infopanel_core::config::WeatherSettings;
use infopanel_core::traits::{WeatherError, WeatherSnapshot};

/// Current weather endpoint
const API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the current weather endpoint
pub struct OpenWeatherClient {
    http: reqwest::blocking::Client,
    city: String,
    api_key: String,
    lang: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &WeatherSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            city: settings.city.clone(),
            api_key: settings.api_key.clone(),
            lang: settings.lang.clone(),
        })
    }

    /// Fetch current weather in metric units
    pub fn fetch(&self) -> Result<WeatherSnapshot, WeatherError> {
        let body = self
            .http
            .get(API_URL)
            .query(&[
                ("q", self.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            // The URL carries the API key
            .map_err(|e| WeatherError::Unavailable(e.without_url().to_string()))?;

        trace!("Weather response: {}", body);
        parse_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    name: String,
    main: Main,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f32,
    feels_like: f32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f32,
}

/// Turn a response body into a snapshot
pub fn parse_response(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    let response: Response = serde_json::from_str(body)
        .map_err(|e| WeatherError::Unavailable(format!("unexpected response: {e}")))?;

    let description = response
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .unwrap_or_default();

    Ok(WeatherSnapshot {
        city: response.name,
        temperature_c: response.main.temp,
        feels_like_c: response.main.feels_like,
        humidity_pct: response.main.humidity,
        description,
        wind_speed_ms: response.wind.speed,
    })
}
