//! Serial port transport

use std::io::{self, Write};
use std::time::Duration;

use infopanel_hal::{ByteSink, DataBits, Parity, StopBits, UartConfig};
use log::debug;
use serialport::{FlowControl, SerialPort};

/// Display connected to a serial port
pub struct SerialSink {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialSink {
    /// Open `path` with the given line settings
    pub fn open(path: &str, config: &UartConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(u64::from(config.timeout_ms)))
            .open()?;

        debug!("Opened {} at {} baud", path, config.baudrate);
        Ok(Self {
            port,
            name: path.to_string(),
        })
    }

    /// Port name as given to [`SerialSink::open`]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ByteSink for SerialSink {
    type Error = io::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }

    fn close(mut self) -> Result<(), Self::Error> {
        self.port.flush()?;
        debug!("Closed {}", self.name);
        Ok(())
    }
}

fn data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}
