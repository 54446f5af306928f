//! Text display trait
//!
//! Defines the interface the content scheduler renders through.

use infopanel_protocol::{CommandError, Encoding, EncodingError, UnsupportedEncoding};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    /// The byte sink failed; the display session is over
    #[error("display transport failed")]
    Transport,
    /// Position or text extent beyond the display bounds
    #[error("position row {row}, column {col} is outside the display")]
    OutOfBounds { row: u32, col: u32 },
    /// Text contains characters outside the active encoding
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// Device command could not be encoded
    #[error(transparent)]
    Command(#[from] CommandError),
    /// Encoding name not supported by the display
    #[error(transparent)]
    UnsupportedEncoding(#[from] UnsupportedEncoding),
    /// Geometry outside the supported range
    #[error("unsupported display geometry {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },
}

impl DisplayError {
    /// Transport errors end the session; everything else is recoverable
    pub fn is_fatal(&self) -> bool {
        matches!(self, DisplayError::Transport)
    }
}

/// Text display trait
///
/// A cursor-addressed character display. Positions are zero-based
/// `(row, col)`.
pub trait TextDisplay {
    /// Clear the display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write text at the cursor without changing rows
    ///
    /// Rejected as a whole if it does not fit in the rest of the row.
    fn write_line(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Write text at the cursor, then move to the start of the next row
    ///
    /// The row after the last one is row 0.
    fn write_line_and_advance(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// `col` may equal the column count (just past the last cell).
    fn set_cursor(&mut self, row: u32, col: u32) -> Result<(), DisplayError>;

    /// Current cursor position
    fn cursor(&self) -> (u32, u32);

    /// Select the character encoding for following text
    fn set_encoding(&mut self, encoding: Encoding) -> Result<(), DisplayError>;

    /// Active character encoding
    fn encoding(&self) -> Encoding;

    /// Get the display dimensions
    ///
    /// Returns (rows, columns) in character units
    fn dimensions(&self) -> (u32, u32);
}
