//! Data source traits
//!
//! These traits define the interface between the scheduler and the services
//! that feed it.

pub mod weather;

pub use weather::{WeatherError, WeatherProvider, WeatherSnapshot};
