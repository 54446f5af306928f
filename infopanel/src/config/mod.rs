//! Configuration loading and saving
//!
//! Settings live in a TOML file next to the binary (`infopanel.toml` by
//! default). A missing file is created with defaults.

pub mod loader;

pub use loader::{load, save, Overrides};
