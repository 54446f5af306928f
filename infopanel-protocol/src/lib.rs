//! Customer display wire protocol
//!
//! This crate defines the byte stream understood by ESC/POS-style character
//! displays (two-line VFD/LCD "customer displays"). The host writes; the
//! display never answers.
//!
//! # Protocol Overview
//!
//! Commands are short escape sequences interleaved with raw text bytes:
//! ```text
//! ┌──────────────────────┬────────────────────────────┐
//! │ Reset                │ 1B 40                      │
//! │ Clear                │ 0C                         │
//! │ Encoding: Latin      │ 1B 74 00                   │
//! │ Encoding: Cyrillic   │ 1B 74 11                   │
//! │ Encoding: Katakana   │ 1B 74 01  1B 52 08         │
//! │ Cursor (row, col)    │ 1F 24 <col+1> <row+1>      │
//! │ Text                 │ codec bytes, no terminator │
//! └──────────────────────┴────────────────────────────┘
//! ```
//!
//! Text is transcoded through one of three single-byte codecs selected by
//! [`Encoding`]. Control bytes are never valid text, so a text run can never
//! be mistaken for a command.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod decoder;
pub mod encoding;

pub use command::{CommandError, DeviceCommand, MAX_COMMAND_SIZE};
pub use decoder::{CommandParser, DecodeError, DeviceEvent};
pub use encoding::{Encoding, EncodingError, UnsupportedEncoding};
