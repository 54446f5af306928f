//! Configuration type definitions
//!
//! Every field has a default so a partial file is still a complete
//! configuration. Call [`PanelConfig::validate`] after loading.

use alloc::string::String;

use infopanel_display::{DisplayConfig, Encoding, MAX_COLS, MAX_ROWS};
use jiff::SignedDuration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default serial speed of customer displays
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Default weather refresh interval (30 minutes)
pub const DEFAULT_REFRESH_INTERVAL_S: u64 = 1800;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Port is neither `COM<n>` nor a device path
    #[error("invalid serial port {0:?}, expected COM<n> or /dev/...")]
    InvalidPort(String),
    /// Baud rate of zero
    #[error("baud rate must be positive")]
    InvalidBaudrate,
    /// Display geometry outside the supported range
    #[error("display must be 1..={max_rows} rows by 1..={max_cols} columns, got {rows}x{cols}")]
    InvalidDimensions {
        rows: u32,
        cols: u32,
        max_rows: u32,
        max_cols: u32,
    },
    /// A timing setting of zero
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Serial link settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SerialSettings {
    /// `COM3` on Windows, `/dev/ttyUSB0` elsewhere
    pub port: String,
    pub baudrate: u32,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: String::new(),
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

impl SerialSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_port(&self.port) {
            return Err(ConfigError::InvalidPort(self.port.clone()));
        }
        if self.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        Ok(())
    }
}

/// Check a serial port identifier
pub fn is_valid_port(port: &str) -> bool {
    if let Some(number) = port.strip_prefix("COM") {
        return !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit());
    }
    port.strip_prefix("/dev/")
        .is_some_and(|name| !name.is_empty() && !name.ends_with('/'))
}

/// Display geometry and character set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplaySettings {
    pub rows: u32,
    pub cols: u32,
    pub encoding: Encoding,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let config = DisplayConfig::default();
        Self {
            rows: config.rows,
            cols: config.cols,
            encoding: config.encoding,
        }
    }
}

impl DisplaySettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_display_config()
            .validate()
            .map_err(|_| ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
                max_rows: MAX_ROWS,
                max_cols: MAX_COLS,
            })
    }

    /// Driver configuration for these settings
    pub fn to_display_config(&self) -> DisplayConfig {
        DisplayConfig {
            rows: self.rows,
            cols: self.cols,
            encoding: self.encoding,
        }
    }
}

/// Weather service settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeatherSettings {
    pub city: String,
    /// OpenWeatherMap API key
    pub api_key: String,
    /// Language of the weather description
    pub lang: String,
    pub refresh_interval_s: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            city: String::new(),
            api_key: String::new(),
            lang: String::from("ru"),
            refresh_interval_s: DEFAULT_REFRESH_INTERVAL_S,
        }
    }
}

impl WeatherSettings {
    /// Both city and API key are set
    pub fn is_configured(&self) -> bool {
        !self.city.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_s == 0 {
            return Err(ConfigError::ZeroInterval("weather.refresh_interval_s"));
        }
        Ok(())
    }
}

/// Scheduler timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerSettings {
    /// Auto-switch period (seconds)
    pub switch_period_s: u32,
    /// Pause between scheduler ticks (milliseconds)
    pub tick_interval_ms: u32,
    /// How long the listener waits for a command before checking for
    /// shutdown (milliseconds)
    pub listener_timeout_ms: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            switch_period_s: 30,
            tick_interval_ms: 200,
            listener_timeout_ms: 500,
        }
    }
}

impl SchedulerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.switch_period_s == 0 {
            return Err(ConfigError::ZeroInterval("scheduler.switch_period_s"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("scheduler.tick_interval_ms"));
        }
        if self.listener_timeout_ms == 0 {
            return Err(ConfigError::ZeroInterval("scheduler.listener_timeout_ms"));
        }
        Ok(())
    }

    pub fn switch_period(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.switch_period_s))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    pub serial: SerialSettings,
    pub display: DisplaySettings,
    pub weather: WeatherSettings,
    pub scheduler: SchedulerSettings,
}

impl PanelConfig {
    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.serial.validate()?;
        self.validate_offline()
    }

    /// Check everything except the serial link
    ///
    /// For running against the emulated display.
    pub fn validate_offline(&self) -> Result<(), ConfigError> {
        self.display.validate()?;
        self.weather.validate()?;
        self.scheduler.validate()
    }
}
