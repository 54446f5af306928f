//! Async loops and worker threads
//!
//! The scheduler and listener run on the embassy executor and share the
//! panel through an async mutex. Blocking I/O (stdin, HTTP) happens on
//! plain threads that talk to the loops through the command channel and
//! the weather cache.

pub mod commands;
pub mod listener;
pub mod scheduler;
pub mod weather;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use infopanel_core::scheduler::ContentPanel;

pub use commands::spawn_command_source;
pub use listener::listener_loop;
pub use scheduler::scheduler_loop;
pub use weather::spawn_weather_poller;

/// The panel as shared between the loops
pub type SharedPanel<D, W> = Mutex<CriticalSectionRawMutex, ContentPanel<D, W>>;
