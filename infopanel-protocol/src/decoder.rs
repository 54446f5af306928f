//! Command stream decoding
//!
//! The inverse of [`crate::command`]: turns the byte stream written to the
//! display back into commands and text bytes. Used by the display emulator.

use heapless::Vec;

use crate::command::{ESC, FF, MOVE_CURSOR, SELECT_CODE_TABLE, SELECT_INTERNATIONAL, US};

/// Errors that can occur while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// `ESC` followed by an unknown command byte
    #[error("unknown escape sequence ESC {0:#04x}")]
    UnknownEscape(u8),
    /// `US` followed by an unknown command byte
    #[error("unknown unit sequence US {0:#04x}")]
    UnknownUnit(u8),
    /// Control byte that starts no known command
    #[error("unexpected control byte {0:#04x}")]
    UnexpectedControl(u8),
    /// Cursor coordinate of zero (the wire is one-based)
    #[error("cursor coordinate must be one-based")]
    InvalidPosition,
    /// Output buffer full
    #[error("too many events for the output buffer")]
    Overflow,
}

/// A decoded unit of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// `ESC @`
    Reset,
    /// `FF`
    Clear,
    /// `ESC t n`
    CodePage(u8),
    /// `ESC R n`
    InternationalSet(u8),
    /// `US $ x y`, converted to zero-based coordinates
    Cursor { row: u8, col: u8 },
    /// A text byte, to be interpreted by the active code table
    Text(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Between commands
    Ground,
    /// Got ESC
    Escape,
    /// Got ESC t, waiting for the table number
    CodePage,
    /// Got ESC R, waiting for the set number
    International,
    /// Got US
    Unit,
    /// Got US $, waiting for the column
    CursorCol,
    /// Got the column, waiting for the row
    CursorRow { col: u8 },
}

/// State machine for decoding the command stream
#[derive(Debug, Clone)]
pub struct CommandParser {
    state: ParseState,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    /// Create a new parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Ground,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::Ground;
    }

    /// True when no command is partially received
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::Ground
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(event))` when a command or text byte is complete,
    /// `Ok(None)` when more bytes are needed. After an error the parser is
    /// back in its ground state.
    pub fn feed(&mut self, byte: u8) -> Result<Option<DeviceEvent>, DecodeError> {
        let (next, result) = match self.state {
            ParseState::Ground => match byte {
                ESC => (ParseState::Escape, Ok(None)),
                US => (ParseState::Unit, Ok(None)),
                FF => (ParseState::Ground, Ok(Some(DeviceEvent::Clear))),
                0x00..=0x1F | 0x7F => (
                    ParseState::Ground,
                    Err(DecodeError::UnexpectedControl(byte)),
                ),
                _ => (ParseState::Ground, Ok(Some(DeviceEvent::Text(byte)))),
            },
            ParseState::Escape => match byte {
                0x40 => (ParseState::Ground, Ok(Some(DeviceEvent::Reset))),
                SELECT_CODE_TABLE => (ParseState::CodePage, Ok(None)),
                SELECT_INTERNATIONAL => (ParseState::International, Ok(None)),
                _ => (ParseState::Ground, Err(DecodeError::UnknownEscape(byte))),
            },
            ParseState::CodePage => (ParseState::Ground, Ok(Some(DeviceEvent::CodePage(byte)))),
            ParseState::International => (
                ParseState::Ground,
                Ok(Some(DeviceEvent::InternationalSet(byte))),
            ),
            ParseState::Unit => match byte {
                MOVE_CURSOR => (ParseState::CursorCol, Ok(None)),
                _ => (ParseState::Ground, Err(DecodeError::UnknownUnit(byte))),
            },
            ParseState::CursorCol => match byte.checked_sub(1) {
                Some(col) => (ParseState::CursorRow { col }, Ok(None)),
                None => (ParseState::Ground, Err(DecodeError::InvalidPosition)),
            },
            ParseState::CursorRow { col } => match byte.checked_sub(1) {
                Some(row) => (
                    ParseState::Ground,
                    Ok(Some(DeviceEvent::Cursor { row, col })),
                ),
                None => (ParseState::Ground, Err(DecodeError::InvalidPosition)),
            },
        };

        self.state = next;
        result
    }

    /// Decode a complete byte sequence
    pub fn decode<const N: usize>(
        &mut self,
        bytes: &[u8],
    ) -> Result<Vec<DeviceEvent, N>, DecodeError> {
        let mut events = Vec::new();
        for &byte in bytes {
            if let Some(event) = self.feed(byte)? {
                events.push(event).map_err(|_| DecodeError::Overflow)?;
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::DeviceCommand;
    use crate::encoding::Encoding;
    use proptest::prelude::*;

    #[test]
    fn test_decode_session_start() {
        let mut parser = CommandParser::new();
        let events: Vec<DeviceEvent, 8> = parser
            .decode(&[0x1B, 0x40, 0x1B, 0x74, 0x11, 0x0C])
            .unwrap();

        assert_eq!(
            events,
            [
                DeviceEvent::Reset,
                DeviceEvent::CodePage(0x11),
                DeviceEvent::Clear
            ]
        );
    }

    #[test]
    fn test_decode_cursor_and_text() {
        let mut parser = CommandParser::new();
        let events: Vec<DeviceEvent, 8> = parser
            .decode(&[0x1F, 0x24, 0x01, 0x02, b'H', b'i'])
            .unwrap();

        assert_eq!(
            events,
            [
                DeviceEvent::Cursor { row: 1, col: 0 },
                DeviceEvent::Text(b'H'),
                DeviceEvent::Text(b'i')
            ]
        );
    }

    #[test]
    fn test_split_command_needs_more_bytes() {
        let mut parser = CommandParser::new();
        assert_eq!(parser.feed(0x1F), Ok(None));
        assert_eq!(parser.feed(0x24), Ok(None));
        assert!(!parser.is_idle());
        assert_eq!(parser.feed(0x05), Ok(None));
        assert_eq!(
            parser.feed(0x01),
            Ok(Some(DeviceEvent::Cursor { row: 0, col: 4 }))
        );
        assert!(parser.is_idle());
    }

    #[test]
    fn test_unknown_escape_resyncs() {
        let mut parser = CommandParser::new();
        assert_eq!(parser.feed(0x1B), Ok(None));
        assert_eq!(parser.feed(0x99), Err(DecodeError::UnknownEscape(0x99)));
        assert_eq!(parser.feed(b'A'), Ok(Some(DeviceEvent::Text(b'A'))));
    }

    #[test]
    fn test_zero_coordinate_rejected() {
        let mut parser = CommandParser::new();
        let result: Result<Vec<DeviceEvent, 4>, _> = parser.decode(&[0x1F, 0x24, 0x00, 0x01]);
        assert_eq!(result, Err(DecodeError::InvalidPosition));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_katakana_selection_decodes() {
        let bytes = DeviceCommand::SelectEncoding(Encoding::Katakana)
            .to_bytes()
            .unwrap();
        let mut parser = CommandParser::new();
        let events: Vec<DeviceEvent, 2> = parser.decode(&bytes).unwrap();
        assert_eq!(
            events,
            [DeviceEvent::CodePage(0x01), DeviceEvent::InternationalSet(0x08)]
        );
    }

    #[test]
    fn test_stray_control_byte() {
        let mut parser = CommandParser::new();
        assert_eq!(parser.feed(b'\n'), Err(DecodeError::UnexpectedControl(b'\n')));
    }

    proptest! {
        #[test]
        fn test_cursor_command_decodes_to_itself(row in 0u8..254, col in 0u8..254) {
            let bytes = DeviceCommand::SetCursor { row, col }.to_bytes().unwrap();
            let mut parser = CommandParser::new();
            let events: Vec<DeviceEvent, 2> = parser.decode(&bytes).unwrap();
            prop_assert_eq!(&events[..], &[DeviceEvent::Cursor { row, col }]);
        }
    }
}
