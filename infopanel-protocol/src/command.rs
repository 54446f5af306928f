//! Device command encoding
//!
//! Every command is a fixed, short byte sequence. Cursor coordinates are
//! zero-based in the API and one-based on the wire.

use heapless::Vec;

use crate::encoding::Encoding;

/// Escape prefix
pub const ESC: u8 = 0x1B;

/// Unit separator, prefix of the cursor command
pub const US: u8 = 0x1F;

/// Form feed: clear the screen and home the cursor
pub const FF: u8 = 0x0C;

/// `ESC @` - initialize the display
pub const RESET: [u8; 2] = [ESC, 0x40];

/// Second byte of `ESC t n` (select character code table)
pub const SELECT_CODE_TABLE: u8 = 0x74;

/// Second byte of `ESC R n` (select international character set)
pub const SELECT_INTERNATIONAL: u8 = 0x52;

/// Second byte of `US $ x y` (move cursor)
pub const MOVE_CURSOR: u8 = 0x24;

/// Largest encoded command (Katakana selection)
pub const MAX_COMMAND_SIZE: usize = 6;

/// Command encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Output buffer has no room for the command
    #[error("command does not fit in the output buffer")]
    BufferFull,
    /// Coordinate cannot be represented as a one-based byte
    #[error("cursor position out of wire range")]
    PositionOutOfRange,
}

/// Commands understood by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Initialize the display (clears it and restores the default code table)
    Reset,
    /// Clear the screen
    Clear,
    /// Select the character code table for following text
    SelectEncoding(Encoding),
    /// Move the cursor to a zero-based position
    SetCursor { row: u8, col: u8 },
}

impl DeviceCommand {
    /// Append this command to `out`
    ///
    /// Nothing is appended when an error is returned.
    pub fn encode_into<const N: usize>(&self, out: &mut Vec<u8, N>) -> Result<(), CommandError> {
        let start = out.len();
        let result = self.push_bytes(out);
        if result.is_err() {
            out.truncate(start);
        }
        result
    }

    /// Encode this command on its own
    pub fn to_bytes(&self) -> Result<Vec<u8, MAX_COMMAND_SIZE>, CommandError> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    fn push_bytes<const N: usize>(&self, out: &mut Vec<u8, N>) -> Result<(), CommandError> {
        match *self {
            DeviceCommand::Reset => extend(out, &RESET),
            DeviceCommand::Clear => extend(out, &[FF]),
            DeviceCommand::SelectEncoding(encoding) => {
                extend(out, &[ESC, SELECT_CODE_TABLE, encoding.code_page()])?;
                if let Some(set) = encoding.international_set() {
                    extend(out, &[ESC, SELECT_INTERNATIONAL, set])?;
                }
                Ok(())
            }
            DeviceCommand::SetCursor { row, col } => {
                let x = col.checked_add(1).ok_or(CommandError::PositionOutOfRange)?;
                let y = row.checked_add(1).ok_or(CommandError::PositionOutOfRange)?;
                extend(out, &[US, MOVE_CURSOR, x, y])
            }
        }
    }
}

fn extend<const N: usize>(out: &mut Vec<u8, N>, bytes: &[u8]) -> Result<(), CommandError> {
    out.extend_from_slice(bytes)
        .map_err(|_| CommandError::BufferFull)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_bytes() {
        assert_eq!(DeviceCommand::Reset.to_bytes().unwrap(), [0x1B, 0x40]);
    }

    #[test]
    fn test_clear_bytes() {
        assert_eq!(DeviceCommand::Clear.to_bytes().unwrap(), [0x0C]);
    }

    #[test]
    fn test_select_encoding_bytes() {
        let cyrillic = DeviceCommand::SelectEncoding(Encoding::Cyrillic);
        assert_eq!(cyrillic.to_bytes().unwrap(), [0x1B, 0x74, 0x11]);

        let latin = DeviceCommand::SelectEncoding(Encoding::Latin);
        assert_eq!(latin.to_bytes().unwrap(), [0x1B, 0x74, 0x00]);

        let katakana = DeviceCommand::SelectEncoding(Encoding::Katakana);
        assert_eq!(
            katakana.to_bytes().unwrap(),
            [0x1B, 0x74, 0x01, 0x1B, 0x52, 0x08]
        );
    }

    #[test]
    fn test_cursor_is_one_based_col_first() {
        let cmd = DeviceCommand::SetCursor { row: 1, col: 0 };
        assert_eq!(cmd.to_bytes().unwrap(), [0x1F, 0x24, 0x01, 0x02]);

        let cmd = DeviceCommand::SetCursor { row: 0, col: 19 };
        assert_eq!(cmd.to_bytes().unwrap(), [0x1F, 0x24, 20, 1]);
    }

    #[test]
    fn test_cursor_out_of_wire_range() {
        let cmd = DeviceCommand::SetCursor { row: 0, col: 255 };
        assert_eq!(cmd.to_bytes(), Err(CommandError::PositionOutOfRange));
    }

    #[test]
    fn test_encode_into_is_all_or_nothing() {
        let mut out: Vec<u8, 4> = Vec::new();
        out.push(0xAA).unwrap();

        // Katakana selection needs six bytes, only three are free
        let cmd = DeviceCommand::SelectEncoding(Encoding::Katakana);
        assert_eq!(cmd.encode_into(&mut out), Err(CommandError::BufferFull));
        assert_eq!(out, [0xAA]);
    }
}
