//! Display emulator
//!
//! A [`ByteSink`] that interprets the command stream the way the hardware
//! does and keeps the result in its own [`ScreenBuffer`]. Useful for running
//! without a device attached, and for checking the driver's mirror against
//! an independent reading of the bytes it sent.

use infopanel_hal::ByteSink;
use infopanel_protocol::{CommandParser, DecodeError, DeviceEvent, Encoding};
use log::trace;

use crate::screen::ScreenBuffer;

/// Glyph shown for bytes the active code table does not define
const UNKNOWN_GLYPH: char = '?';

/// Emulator errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmulatorError {
    /// The byte stream is not a valid command sequence
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Software stand-in for a serial customer display
#[derive(Debug, Clone)]
pub struct EmulatedDisplay {
    parser: CommandParser,
    screen: ScreenBuffer,
    row: usize,
    col: usize,
    /// `None` while an unknown code table is selected
    encoding: Option<Encoding>,
    received: usize,
}

impl EmulatedDisplay {
    /// Create a powered-on display with a blank screen
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            parser: CommandParser::new(),
            screen: ScreenBuffer::new(rows.max(1), cols.max(1)),
            row: 0,
            col: 0,
            encoding: Some(Encoding::Latin),
            received: 0,
        }
    }

    /// What the display currently shows
    pub fn screen(&self) -> &ScreenBuffer {
        &self.screen
    }

    /// Cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Selected character table, if it is one the emulator knows
    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    /// Total bytes accepted
    pub fn bytes_received(&self) -> usize {
        self.received
    }

    fn home(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    fn apply(&mut self, event: DeviceEvent) {
        trace!("Emulator: {:?}", event);
        match event {
            DeviceEvent::Reset => {
                self.screen.clear();
                self.home();
                self.encoding = Some(Encoding::Latin);
            }
            DeviceEvent::Clear => {
                self.screen.clear();
                self.home();
            }
            DeviceEvent::CodePage(page) => {
                self.encoding = Encoding::from_code_page(page);
            }
            // Only the katakana table uses an international set and the
            // code page already tells it apart
            DeviceEvent::InternationalSet(_) => {}
            DeviceEvent::Cursor { row, col } => {
                // The hardware clamps rather than rejecting
                self.row = usize::from(row).min(self.screen.rows() - 1);
                self.col = usize::from(col).min(self.screen.cols());
            }
            DeviceEvent::Text(byte) => {
                if self.col >= self.screen.cols() {
                    self.col = 0;
                    self.row = (self.row + 1) % self.screen.rows();
                }
                let ch = self
                    .encoding
                    .and_then(|encoding| encoding.decode_byte(byte))
                    .unwrap_or(UNKNOWN_GLYPH);
                self.screen.put_char(self.row, self.col, ch);
                self.col += 1;
            }
        }
    }
}

impl ByteSink for EmulatedDisplay {
    type Error = EmulatorError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.received += data.len();
        for &byte in data {
            if let Some(event) = self.parser.feed(byte)? {
                self.apply(event);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}
