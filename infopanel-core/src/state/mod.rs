//! Display modes and commands
//!
//! Modes are a closed set; every command that reaches the scheduler has
//! already been parsed into one of them.

pub mod command;
pub mod mode;

pub use command::{Command, InvalidCommand};
pub use mode::{Content, Mode};
