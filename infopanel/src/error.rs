//! Application errors

use std::io;
use std::path::PathBuf;

use infopanel_core::config::ConfigError;
use infopanel_display::DisplayError;

/// Errors that stop the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Settings file could not be read
    #[error("cannot read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Settings file is not valid TOML for the expected layout
    #[error("invalid settings in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// Settings file could not be written
    #[error("cannot write {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize settings: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    /// A fresh settings file was written and needs filling in
    #[error("created {} with default settings; set the serial port and weather options, then start again", .0.display())]
    ConfigCreated(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The serial port could not be opened
    #[error("cannot open serial port {port}: {source}")]
    SerialOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error("cannot set up HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
