//! Display transports
//!
//! The panel writes either to a real device on a serial port or to the
//! emulator, which logs what the device would show.

pub mod serial;

use std::io;

use infopanel_display::{Driver, EmulatedDisplay, EmulatorError};
use infopanel_hal::ByteSink;
use log::info;

pub use serial::SerialSink;

/// Errors from either transport
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("serial port: {0}")]
    Serial(#[from] io::Error),
    #[error("emulator: {0}")]
    Emulator(#[from] EmulatorError),
}

/// Where display bytes go
pub enum PanelSink {
    Serial(SerialSink),
    Emulated(EmulatedDisplay),
}

impl ByteSink for PanelSink {
    type Error = SinkError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        match self {
            PanelSink::Serial(port) => port.write_blocking(data)?,
            PanelSink::Emulated(display) => display.write_blocking(data)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match self {
            PanelSink::Serial(port) => port.flush()?,
            PanelSink::Emulated(display) => display.flush()?,
        }
        Ok(())
    }

    fn close(self) -> Result<(), Self::Error> {
        match self {
            PanelSink::Serial(port) => port.close()?,
            PanelSink::Emulated(display) => display.close()?,
        }
        Ok(())
    }
}

/// Log the emulated screen after a redraw
///
/// Does nothing for a real device.
pub fn log_screen(driver: &Driver<PanelSink>) {
    if let PanelSink::Emulated(display) = driver.sink() {
        for line in display.screen().lines() {
            info!("|{}|", line);
        }
    }
}
