//! Settings file persistence

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

use infopanel_core::config::PanelConfig;

use crate::error::AppError;

/// Values given on the command line that replace file settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub port: Option<String>,
    pub city: Option<String>,
    pub api_key: Option<String>,
}

impl Overrides {
    /// Check if nothing is overridden
    pub fn is_empty(&self) -> bool {
        self.port.is_none() && self.city.is_none() && self.api_key.is_none()
    }

    /// Apply the overrides to `config`
    pub fn apply(&self, config: &mut PanelConfig) {
        if let Some(port) = &self.port {
            config.serial.port = port.clone();
        }
        if let Some(city) = &self.city {
            config.weather.city = city.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.weather.api_key = api_key.clone();
        }
    }
}

/// Load settings from `path`
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load(path: &Path) -> Result<Option<PanelConfig>, AppError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No settings file at {}", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = toml::from_str(&text).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    log_config_summary(path, &config);
    Ok(Some(config))
}

/// Write settings to `path`, replacing the file
pub fn save(path: &Path, config: &PanelConfig) -> Result<(), AppError> {
    let text = toml::to_string_pretty(config)?;
    fs::write(path, text).map_err(|source| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Settings saved to {}", path.display());
    Ok(())
}

/// Log a summary of the loaded configuration
fn log_config_summary(path: &Path, config: &PanelConfig) {
    info!("Settings loaded from {}", path.display());
    debug!(
        "  serial: {:?} at {} baud",
        config.serial.port, config.serial.baudrate
    );
    debug!(
        "  display: {}x{}, {}",
        config.display.rows, config.display.cols, config.display.encoding
    );
    debug!(
        "  weather: {:?}, refresh every {} s",
        config.weather.city, config.weather.refresh_interval_s
    );
}
