//! Device-agnostic content logic for the information panel
//!
//! This crate contains everything that decides what the display shows,
//! independent of the serial port, the HTTP client and the async runtime:
//!
//! - Display modes and the commands that select them
//! - Content scheduler (clock, weather, auto-switch)
//! - Weather provider abstraction
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod scheduler;
pub mod state;
pub mod traits;
