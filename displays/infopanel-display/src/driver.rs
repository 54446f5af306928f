//! Serial customer display driver
//!
//! Turns text operations into the device command stream while keeping an
//! authoritative mirror of the screen and cursor.
//!
//! Every operation builds its complete frame (command and text bytes) before
//! sending anything, hands it to the sink in a single write, and updates the
//! mirror only after that write succeeded. A rejected or failed operation
//! therefore leaves both the device and the mirror as they were.

use alloc::string::String;

use heapless::Vec;
use infopanel_hal::ByteSink;
use infopanel_protocol::{DeviceCommand, Encoding, MAX_COMMAND_SIZE};
use log::{debug, trace, warn};

use crate::backend::{DisplayError, TextDisplay};
use crate::screen::ScreenBuffer;

/// Largest supported number of rows
pub const MAX_ROWS: u32 = 4;

/// Largest supported number of columns
pub const MAX_COLS: u32 = 40;

/// One full row of text followed by a cursor command
const MAX_FRAME_SIZE: usize = MAX_COLS as usize + MAX_COMMAND_SIZE;

type Frame = Vec<u8, MAX_FRAME_SIZE>;

/// Display geometry and initial encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Number of character rows
    pub rows: u32,
    /// Number of character columns
    pub cols: u32,
    /// Encoding selected when the session starts
    pub encoding: Encoding,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 20,
            encoding: Encoding::Cyrillic,
        }
    }
}

impl DisplayConfig {
    /// Check the geometry against the supported range
    pub fn validate(&self) -> Result<(), DisplayError> {
        if (1..=MAX_ROWS).contains(&self.rows) && (1..=MAX_COLS).contains(&self.cols) {
            Ok(())
        } else {
            Err(DisplayError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

/// The driver's model of the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    rows: u32,
    cols: u32,
    cursor_row: u32,
    cursor_col: u32,
    buffer: ScreenBuffer,
    encoding: Encoding,
}

impl DisplayState {
    fn new(config: &DisplayConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            cursor_row: 0,
            cursor_col: 0,
            buffer: ScreenBuffer::new(config.rows as usize, config.cols as usize),
            encoding: config.encoding,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Cursor position as (row, col)
    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_row, self.cursor_col)
    }

    /// Mirror of the on-screen content
    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Active encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

/// Driver for one display session
///
/// Owns the byte sink for its whole lifetime. Dropping the driver drops the
/// sink; [`Driver::close`] releases it explicitly and reports failures.
pub struct Driver<S: ByteSink> {
    sink: S,
    state: DisplayState,
}

impl<S: ByteSink> Driver<S> {
    /// Start a session: reset the device and select the initial encoding
    pub fn new(sink: S, config: DisplayConfig) -> Result<Self, DisplayError> {
        config.validate()?;

        let mut driver = Self {
            sink,
            state: DisplayState::new(&config),
        };

        let mut frame = Frame::new();
        DeviceCommand::Reset.encode_into(&mut frame)?;
        DeviceCommand::SelectEncoding(config.encoding).encode_into(&mut frame)?;
        driver.send(&frame)?;

        debug!(
            "Display session started: {}x{}, {}",
            config.rows, config.cols, config.encoding
        );
        Ok(driver)
    }

    /// The driver's model of the device
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Mirrored content of one row, padded to the full width
    pub fn line(&self, row: u32) -> Option<String> {
        self.state.buffer.line(row as usize)
    }

    /// Select an encoding by name (`latin`, `cyrillic`, `katakana`, or
    /// the short codes `EU`, `RU`, `JP`)
    pub fn set_encoding_named(&mut self, name: &str) -> Result<(), DisplayError> {
        let encoding: Encoding = name.parse()?;
        self.set_encoding(encoding)
    }

    /// Underlying byte sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Underlying byte sink, mutably
    ///
    /// Bytes written here bypass the mirror.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// End the session and release the transport
    ///
    /// The device is not reset; it keeps showing its last content.
    pub fn close(self) -> Result<(), DisplayError> {
        debug!("Display session closed");
        self.sink.close().map_err(|e| {
            warn!("Failed to close display transport: {:?}", e);
            DisplayError::Transport
        })
    }

    /// Hand one frame to the sink
    fn send(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        if frame.is_empty() {
            return Ok(());
        }

        trace!("TX: {} bytes", frame.len());
        let result = match self.sink.write_blocking(frame) {
            Ok(()) => self.sink.flush(),
            Err(e) => Err(e),
        };
        result.map_err(|e| {
            warn!("Display write failed: {:?}", e);
            DisplayError::Transport
        })
    }

    /// Write text at the cursor, optionally followed by a move to the next row
    fn write_text(&mut self, text: &str, advance: bool) -> Result<(), DisplayError> {
        let (row, col) = self.state.cursor();
        let len = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let end = col.saturating_add(len);
        if end > self.state.cols {
            return Err(DisplayError::OutOfBounds { row, col: end });
        }

        let next_row = (row + 1) % self.state.rows;

        let mut frame = Frame::new();
        self.state.encoding.encode_into(text, &mut frame)?;
        if advance {
            DeviceCommand::SetCursor {
                row: next_row as u8,
                col: 0,
            }
            .encode_into(&mut frame)?;
        }
        self.send(&frame)?;

        self.state.buffer.put_str(row as usize, col as usize, text);
        if advance {
            self.state.cursor_row = next_row;
            self.state.cursor_col = 0;
        } else {
            self.state.cursor_col = end;
        }
        Ok(())
    }
}

impl<S: ByteSink> TextDisplay for Driver<S> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        let frame = DeviceCommand::Clear.to_bytes()?;
        self.send(&frame)?;

        self.state.buffer.clear();
        self.state.cursor_row = 0;
        self.state.cursor_col = 0;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), DisplayError> {
        self.write_text(text, false)
    }

    fn write_line_and_advance(&mut self, text: &str) -> Result<(), DisplayError> {
        self.write_text(text, true)
    }

    fn set_cursor(&mut self, row: u32, col: u32) -> Result<(), DisplayError> {
        if row >= self.state.rows || col > self.state.cols {
            return Err(DisplayError::OutOfBounds { row, col });
        }

        let frame = DeviceCommand::SetCursor {
            row: row as u8,
            col: col as u8,
        }
        .to_bytes()?;
        self.send(&frame)?;

        self.state.cursor_row = row;
        self.state.cursor_col = col;
        Ok(())
    }

    fn cursor(&self) -> (u32, u32) {
        self.state.cursor()
    }

    fn set_encoding(&mut self, encoding: Encoding) -> Result<(), DisplayError> {
        let frame = DeviceCommand::SelectEncoding(encoding).to_bytes()?;
        self.send(&frame)?;

        self.state.encoding = encoding;
        Ok(())
    }

    fn encoding(&self) -> Encoding {
        self.state.encoding
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.state.rows, self.state.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::EmulatedDisplay;
    use infopanel_hal::MockSink;
    use proptest::prelude::*;

    fn config(rows: u32, cols: u32, encoding: Encoding) -> DisplayConfig {
        DisplayConfig {
            rows,
            cols,
            encoding,
        }
    }

    fn driver(rows: u32, cols: u32, encoding: Encoding) -> Driver<MockSink> {
        let mut driver = Driver::new(MockSink::new(), config(rows, cols, encoding)).unwrap();
        driver.sink_mut().take();
        driver
    }

    fn padded(text: &str, cols: usize) -> String {
        let mut line = String::from(text);
        let len = text.chars().count();
        line.extend(core::iter::repeat(' ').take(cols - len));
        line
    }

    #[test]
    fn test_new_resets_and_selects_encoding_in_one_frame() {
        let driver = Driver::new(MockSink::new(), config(2, 20, Encoding::Cyrillic)).unwrap();

        assert_eq!(driver.sink().frames().len(), 1);
        assert_eq!(driver.sink().bytes(), [0x1B, 0x40, 0x1B, 0x74, 0x11]);
        assert_eq!(driver.cursor(), (0, 0));
        assert!(driver.state().buffer().is_blank());
    }

    #[test]
    fn test_new_katakana_selection() {
        let driver = Driver::new(MockSink::new(), config(2, 20, Encoding::Katakana)).unwrap();
        assert_eq!(
            driver.sink().bytes(),
            [0x1B, 0x40, 0x1B, 0x74, 0x01, 0x1B, 0x52, 0x08]
        );
    }

    #[test]
    fn test_new_rejects_bad_geometry() {
        for (rows, cols) in [(0, 20), (2, 0), (MAX_ROWS + 1, 20), (2, MAX_COLS + 1)] {
            let result = Driver::new(MockSink::new(), config(rows, cols, Encoding::Latin));
            assert!(matches!(
                result,
                Err(DisplayError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn test_new_reports_transport_failure() {
        let mut sink = MockSink::new();
        sink.set_fail_writes(true);
        let result = Driver::new(sink, DisplayConfig::default());
        assert!(matches!(result, Err(DisplayError::Transport)));
    }

    #[test]
    fn test_write_line_sends_text_and_mirrors() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.write_line("12:30").unwrap();

        assert_eq!(driver.sink().bytes(), b"12:30");
        assert_eq!(driver.cursor(), (0, 5));
        assert_eq!(driver.line(0).unwrap(), padded("12:30", 20));
    }

    #[test]
    fn test_write_line_continues_on_same_row() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.write_line("Count: ").unwrap();
        driver.write_line("3").unwrap();

        assert_eq!(driver.cursor(), (0, 8));
        assert_eq!(driver.line(0).unwrap(), padded("Count: 3", 20));
    }

    #[test]
    fn test_write_line_exact_fit() {
        let mut driver = driver(1, 5, Encoding::Latin);
        driver.write_line("abcde").unwrap();
        assert_eq!(driver.cursor(), (0, 5));

        // Nothing more fits, but an empty write is still fine
        assert!(matches!(
            driver.write_line("f"),
            Err(DisplayError::OutOfBounds { row: 0, col: 6 })
        ));
        driver.write_line("").unwrap();
    }

    #[test]
    fn test_write_line_overflow_rejected_without_side_effects() {
        let mut driver = driver(2, 10, Encoding::Latin);
        driver.write_line("hello").unwrap();
        driver.sink_mut().take();
        let before = driver.state().clone();

        let result = driver.write_line("world!");
        assert!(matches!(result, Err(DisplayError::OutOfBounds { .. })));
        assert_eq!(driver.state(), &before);
        assert!(driver.sink().bytes().is_empty());
    }

    #[test]
    fn test_unencodable_text_rejected_atomically() {
        let mut driver = driver(2, 20, Encoding::Latin);
        let before = driver.state().clone();

        let result = driver.write_line("abc Ж");
        assert!(matches!(result, Err(DisplayError::Encoding(_))));
        assert_eq!(driver.state(), &before);
        assert!(driver.sink().bytes().is_empty());
    }

    #[test]
    fn test_write_and_advance_single_frame() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.write_line_and_advance("ab").unwrap();

        assert_eq!(driver.sink().frames().len(), 1);
        assert_eq!(driver.sink().bytes(), [b'a', b'b', 0x1F, 0x24, 0x01, 0x02]);
        assert_eq!(driver.cursor(), (1, 0));
    }

    #[test]
    fn test_write_and_advance_wraps_last_row() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.set_cursor(1, 3).unwrap();
        driver.write_line_and_advance("x").unwrap();
        assert_eq!(driver.cursor(), (0, 0));

        let mut single = driver_with_rows(1);
        single.write_line_and_advance("x").unwrap();
        assert_eq!(single.cursor(), (0, 0));
    }

    fn driver_with_rows(rows: u32) -> Driver<MockSink> {
        driver(rows, 20, Encoding::Latin)
    }

    #[test]
    fn test_cyrillic_two_line_scenario() {
        let mut driver = driver(2, 19, Encoding::Cyrillic);
        driver.write_line_and_advance("Взорвано чурок: 3").unwrap();
        driver.write_line("Today is great").unwrap();

        assert_eq!(driver.line(0).unwrap(), padded("Взорвано чурок: 3", 19));
        assert_eq!(driver.line(1).unwrap(), padded("Today is great", 19));
        assert_eq!(driver.cursor(), (1, 14));

        let bytes = driver.sink().bytes();
        // "В" is 0x82 in code page 866
        assert_eq!(bytes[0], 0x82);
        assert_eq!(&bytes[17..21], &[0x1F, 0x24, 0x01, 0x02]);
        assert_eq!(&bytes[21..], b"Today is great");
    }

    #[test]
    fn test_set_cursor_wire_format() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.set_cursor(1, 7).unwrap();
        assert_eq!(driver.sink().bytes(), [0x1F, 0x24, 8, 2]);
        assert_eq!(driver.cursor(), (1, 7));
    }

    #[test]
    fn test_set_cursor_bounds() {
        let mut driver = driver(2, 20, Encoding::Latin);
        assert!(driver.set_cursor(1, 20).is_ok());
        assert_eq!(
            driver.set_cursor(2, 0),
            Err(DisplayError::OutOfBounds { row: 2, col: 0 })
        );
        assert_eq!(
            driver.set_cursor(0, 21),
            Err(DisplayError::OutOfBounds { row: 0, col: 21 })
        );
        assert_eq!(driver.cursor(), (1, 20));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.write_line_and_advance("first").unwrap();
        driver.write_line("second").unwrap();
        driver.sink_mut().take();

        driver.clear().unwrap();
        assert_eq!(driver.sink().bytes(), [0x0C]);
        assert_eq!(driver.cursor(), (0, 0));
        assert!(driver.state().buffer().is_blank());
    }

    #[test]
    fn test_set_encoding_keeps_buffer() {
        let mut driver = driver(2, 20, Encoding::Cyrillic);
        driver.write_line("Привет").unwrap();
        driver.sink_mut().take();

        driver.set_encoding(Encoding::Latin).unwrap();
        assert_eq!(driver.sink().bytes(), [0x1B, 0x74, 0x00]);
        assert_eq!(driver.encoding(), Encoding::Latin);
        assert_eq!(driver.line(0).unwrap(), padded("Привет", 20));

        // Cyrillic text is no longer accepted
        assert!(driver.write_line("да").is_err());
    }

    #[test]
    fn test_set_encoding_named() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.set_encoding_named("RU").unwrap();
        assert_eq!(driver.encoding(), Encoding::Cyrillic);

        let result = driver.set_encoding_named("utf-8");
        assert!(matches!(result, Err(DisplayError::UnsupportedEncoding(_))));
        assert_eq!(driver.encoding(), Encoding::Cyrillic);
    }

    #[test]
    fn test_transport_failure_keeps_mirror() {
        let mut driver = driver(2, 20, Encoding::Latin);
        driver.write_line("kept").unwrap();
        let before = driver.state().clone();

        driver.sink_mut().set_fail_writes(true);
        assert_eq!(driver.write_line("lost"), Err(DisplayError::Transport));
        assert_eq!(driver.clear(), Err(DisplayError::Transport));
        assert_eq!(driver.set_cursor(1, 0), Err(DisplayError::Transport));
        assert_eq!(driver.state(), &before);
    }

    #[test]
    fn test_close_releases_sink() {
        let driver = driver(2, 20, Encoding::Latin);
        assert!(driver.close().is_ok());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Clear,
        Write(String),
        WriteAdvance(String),
        Cursor(u32, u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Clear),
            "[a-zа-я0-9: ]{0,12}".prop_map(Op::Write),
            "[a-zа-я0-9: ]{0,12}".prop_map(Op::WriteAdvance),
            (0u32..3, 0u32..12).prop_map(|(r, c)| Op::Cursor(r, c)),
        ]
    }

    proptest! {
        #[test]
        fn test_set_cursor_roundtrip(row in 0u32..MAX_ROWS, col in 0u32..=MAX_COLS) {
            let mut driver = driver(MAX_ROWS, MAX_COLS, Encoding::Latin);
            driver.set_cursor(row, col).unwrap();
            prop_assert_eq!(driver.cursor(), (row, col));
        }

        #[test]
        fn test_overflow_always_rejected(start in 0u32..=10, text in "[a-z]{1,15}") {
            let mut driver = driver(2, 10, Encoding::Latin);
            driver.set_cursor(0, start).unwrap();
            driver.sink_mut().take();
            let before = driver.state().clone();

            let result = driver.write_line(&text);
            if start as usize + text.len() > 10 {
                let rejected = matches!(result, Err(DisplayError::OutOfBounds { .. }));
                prop_assert!(rejected);
                prop_assert_eq!(driver.state(), &before);
                prop_assert!(driver.sink().bytes().is_empty());
            } else {
                prop_assert!(result.is_ok());
            }
        }

        #[test]
        fn test_emulated_screen_matches_mirror(ops in proptest::collection::vec(op(), 1..24)) {
            let config = config(2, 10, Encoding::Cyrillic);
            let mut driver = Driver::new(EmulatedDisplay::new(2, 10), config).unwrap();

            for op in ops {
                // Rejected operations must not disturb the lockstep either
                let _ = match op {
                    Op::Clear => driver.clear(),
                    Op::Write(text) => driver.write_line(&text),
                    Op::WriteAdvance(text) => driver.write_line_and_advance(&text),
                    Op::Cursor(row, col) => driver.set_cursor(row, col),
                };
                prop_assert_eq!(driver.sink().screen(), driver.state().buffer());
            }
        }
    }
}
