//! Infopanel transport abstraction layer
//!
//! This crate defines the byte-oriented transport the display driver writes
//! to. The physical serial port, an emulated display, and test doubles all
//! implement the same trait, so the driver never knows which one it talks to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  infopanel-display (driver, emulator)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  infopanel-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  serial port  │       │   emulated    │
//! │  (infopanel)  │       │    display    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::ByteSink`] - Write-only byte transport

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
extern crate alloc;

#[cfg(feature = "mock")]
pub mod mock;
pub mod uart;

// Re-export key traits at crate root for convenience
#[cfg(feature = "mock")]
pub use mock::{MockError, MockSink};
pub use uart::{ByteSink, DataBits, Parity, StopBits, UartConfig};
