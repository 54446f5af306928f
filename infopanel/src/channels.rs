//! Inter-task communication
//!
//! The command channel carries parsed commands from the command source
//! thread to the listener. The shutdown token is shared by every loop and
//! thread; each checks it once per bounded wait.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::info;

use infopanel_core::state::Command;

/// Channel capacity for pending commands
pub const COMMAND_CHANNEL_SIZE: usize = 8;

/// Commands from the command source, in arrival order
pub type CommandChannel = Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE>;

/// Cooperative shutdown token
#[derive(Debug, Default)]
pub struct Shutdown {
    requested: AtomicBool,
    failed: AtomicBool,
}

impl Shutdown {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            failed: AtomicBool::new(false),
        }
    }

    /// Ask every loop to stop
    pub fn request(&self, reason: &str) {
        if !self.requested.swap(true, Ordering::AcqRel) {
            info!("Shutting down: {}", reason);
        }
    }

    /// Stop because the display is gone
    pub fn fail(&self, reason: &str) {
        self.failed.store(true, Ordering::Release);
        self.request(reason);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    /// Process exit status for the way the run ended
    pub fn exit_code(&self) -> i32 {
        if self.has_failed() {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_sticky() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_requested());

        shutdown.request("test");
        shutdown.request("again");
        assert!(shutdown.is_requested());
        assert_eq!(shutdown.exit_code(), 0);
    }

    #[test]
    fn test_failure_sets_exit_code() {
        let shutdown = Shutdown::new();
        shutdown.fail("transport");
        assert!(shutdown.is_requested());
        assert_eq!(shutdown.exit_code(), 1);
    }
}
