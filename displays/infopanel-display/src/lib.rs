//! Character-cell display driver for Infopanel
//!
//! This crate provides:
//! - `TextDisplay` trait: the text operations the content scheduler needs
//! - `Driver`: the implementation for ESC/POS-style serial customer displays
//! - `ScreenBuffer`: a rows × columns character grid
//! - `EmulatedDisplay`: a byte sink that decodes the command stream into its
//!   own screen, for dry runs and tests
//!
//! # Architecture
//!
//! The driver keeps an authoritative mirror of what the device shows. Every
//! operation is validated and encoded in full before anything is sent, and
//! the mirror is only updated after the sink accepted the bytes, so the two
//! never drift apart.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod backend;
pub mod driver;
pub mod emulator;
pub mod screen;

// Re-export key types
pub use backend::{DisplayError, TextDisplay};
pub use driver::{DisplayConfig, DisplayState, Driver, MAX_COLS, MAX_ROWS};
pub use emulator::{EmulatedDisplay, EmulatorError};
pub use infopanel_protocol::Encoding;
pub use screen::ScreenBuffer;
