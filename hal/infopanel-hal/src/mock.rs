//! Recording byte sink for host tests

use alloc::vec::Vec;

use crate::uart::ByteSink;

/// Errors injected by [`MockSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Write rejected by failure injection
    WriteFailed,
}

/// Byte sink that records everything written to it
///
/// Each `write_blocking` call is kept as a separate frame so tests can check
/// that one driver operation produced exactly one write.
#[derive(Debug, Default, Clone)]
pub struct MockSink {
    frames: Vec<Vec<u8>>,
    fail_writes: bool,
    flushes: usize,
}

impl MockSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// All bytes written so far, concatenated
    pub fn bytes(&self) -> Vec<u8> {
        self.frames.concat()
    }

    /// Bytes of each write call
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// Forget recorded bytes
    pub fn take(&mut self) -> Vec<u8> {
        let bytes = self.bytes();
        self.frames.clear();
        bytes
    }

    /// Number of flush calls
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl ByteSink for MockSink {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockError::WriteFailed);
        }
        self.frames.push(data.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }

    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}
