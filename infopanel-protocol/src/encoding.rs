//! Single-byte character encodings
//!
//! The display knows three code tables. Each maps a fixed repertoire of
//! Unicode characters to one byte per character:
//!
//! - `Latin`: plain ASCII
//! - `Cyrillic`: code page 866
//! - `Katakana`: JIS X 0201 (ASCII plus half-width katakana)
//!
//! Control characters are outside every repertoire.

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Character encoding of text sent to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Encoding {
    /// ASCII
    #[cfg_attr(feature = "serde", serde(alias = "EU"))]
    Latin,
    /// Code page 866
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "RU"))]
    Cyrillic,
    /// JIS X 0201 half-width katakana
    #[cfg_attr(feature = "serde", serde(alias = "JP"))]
    Katakana,
}

/// Text contains a character the active encoding cannot represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// Character outside the codec's repertoire
    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Unrepresentable { ch: char, encoding: Encoding },
    /// Encoded text does not fit in the output buffer
    #[error("encoded text does not fit in the output buffer")]
    Overflow,
}

/// Name that does not identify one of the three supported encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported encoding (expected latin/EU, cyrillic/RU or katakana/JP)")]
pub struct UnsupportedEncoding;

/// First code point of the half-width katakana block (U+FF61)
const HALFWIDTH_KATAKANA_START: u32 = 0xFF61;

/// Last code point of the half-width katakana block (U+FF9F)
const HALFWIDTH_KATAKANA_END: u32 = 0xFF9F;

/// JIS X 0201 byte for U+FF61
const KATAKANA_BYTE_START: u8 = 0xA1;

/// Upper half of code page 866 (bytes 0x80..=0xFF)
const CP866_HIGH: [char; 128] = [
    // 0x80: А..П
    'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П',
    // 0x90: Р..Я
    'Р', 'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
    // 0xA0: а..п
    'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п',
    // 0xB0: shades and box drawing
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    // 0xC0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    // 0xD0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    // 0xE0: р..я
    'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
    // 0xF0
    'Ё', 'ё', 'Є', 'є', 'Ї', 'ї', 'Ў', 'ў', '°', '∙', '·', '√', '№', '¤', '■', '\u{A0}',
];

impl Encoding {
    /// All supported encodings
    pub const ALL: [Encoding; 3] = [Encoding::Latin, Encoding::Cyrillic, Encoding::Katakana];

    /// Argument of `ESC t n` selecting this code table
    pub const fn code_page(self) -> u8 {
        match self {
            Encoding::Latin => 0x00,
            Encoding::Cyrillic => 0x11,
            Encoding::Katakana => 0x01,
        }
    }

    /// Argument of `ESC R n`, for tables that also need an international set
    pub const fn international_set(self) -> Option<u8> {
        match self {
            Encoding::Katakana => Some(0x08),
            Encoding::Latin | Encoding::Cyrillic => None,
        }
    }

    /// Encoding selected by a code table number
    pub fn from_code_page(page: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code_page() == page)
    }

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Latin => "latin",
            Encoding::Cyrillic => "cyrillic",
            Encoding::Katakana => "katakana",
        }
    }

    /// Encode one character
    pub fn encode_char(self, ch: char) -> Result<u8, EncodingError> {
        let unrepresentable = EncodingError::Unrepresentable { ch, encoding: self };
        let code = ch as u32;

        if is_printable_ascii(code) {
            return Ok(code as u8);
        }

        match self {
            Encoding::Latin => Err(unrepresentable),
            Encoding::Cyrillic => CP866_HIGH
                .iter()
                .position(|&c| c == ch)
                .map(|i| 0x80 + i as u8)
                .ok_or(unrepresentable),
            Encoding::Katakana => {
                if (HALFWIDTH_KATAKANA_START..=HALFWIDTH_KATAKANA_END).contains(&code) {
                    Ok(KATAKANA_BYTE_START + (code - HALFWIDTH_KATAKANA_START) as u8)
                } else {
                    Err(unrepresentable)
                }
            }
        }
    }

    /// Decode one text byte
    ///
    /// Returns `None` for control bytes and unassigned positions.
    pub fn decode_byte(self, byte: u8) -> Option<char> {
        if is_printable_ascii(byte as u32) {
            return Some(byte as char);
        }

        match self {
            Encoding::Latin => None,
            Encoding::Cyrillic => byte
                .checked_sub(0x80)
                .and_then(|i| CP866_HIGH.get(i as usize).copied()),
            Encoding::Katakana => {
                let offset = byte.checked_sub(KATAKANA_BYTE_START)?;
                let code = HALFWIDTH_KATAKANA_START + offset as u32;
                if code <= HALFWIDTH_KATAKANA_END {
                    char::from_u32(code)
                } else {
                    None
                }
            }
        }
    }

    /// Append the encoding of `text` to `out`
    ///
    /// The whole text is rejected on the first unrepresentable character;
    /// `out` is left exactly as it was.
    pub fn encode_into<const N: usize>(
        self,
        text: &str,
        out: &mut Vec<u8, N>,
    ) -> Result<(), EncodingError> {
        let start = out.len();
        for ch in text.chars() {
            let pushed = self
                .encode_char(ch)
                .and_then(|byte| out.push(byte).map_err(|_| EncodingError::Overflow));
            if let Err(e) = pushed {
                out.truncate(start);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Encode `text` into a new buffer
    pub fn encode<const N: usize>(self, text: &str) -> Result<Vec<u8, N>, EncodingError> {
        let mut out = Vec::new();
        self.encode_into(text, &mut out)?;
        Ok(out)
    }

    /// Check that every character of `text` is representable
    pub fn can_encode(self, text: &str) -> bool {
        text.chars().all(|ch| self.encode_char(ch).is_ok())
    }
}

fn is_printable_ascii(code: u32) -> bool {
    (0x20..0x7F).contains(&code)
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = UnsupportedEncoding;

    /// Accepts the lowercase names and the short codes `EU`, `RU`, `JP`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let matches = |name: &str, code: &str| {
            s.eq_ignore_ascii_case(name) || s.eq_ignore_ascii_case(code)
        };

        if matches("latin", "EU") {
            Ok(Encoding::Latin)
        } else if matches("cyrillic", "RU") {
            Ok(Encoding::Cyrillic)
        } else if matches("katakana", "JP") {
            Ok(Encoding::Katakana)
        } else {
            Err(UnsupportedEncoding)
        }
    }
}
