//! Configuration types
//!
//! Settings for the serial link, display geometry, weather service and
//! scheduler timing, loaded from TOML by the application.

pub mod types;

pub use types::*;
