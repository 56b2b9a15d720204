//! # In-Memory Transport
//!
//! A [`Transport`] that records every write instead of sending it, and a
//! [`Pacer`] that records pauses instead of sleeping.
//!
//! Used by the CLI's `--dry-run` mode to dump the exact bytes a print would
//! send, and by tests to check byte order and pacing without hardware.
//!
//! ```
//! use termica::transport::memory::MemoryTransport;
//! use termica::transport::Transport;
//!
//! let (mut transport, recording) = MemoryTransport::new();
//! transport.write(&[27, 64])?;
//! assert_eq!(recording.bytes(), vec![27, 64]);
//!
//! # Ok::<(), termica::TermicaError>(())
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{FlowControl, Pacer, Transport};
use crate::error::TermicaError;

#[derive(Debug, Default)]
struct RecordingState {
    writes: Vec<Vec<u8>>,
    flushes: usize,
    flow_control: FlowControl,
    closed: bool,
}

/// Shared view of what a [`MemoryTransport`] has received.
///
/// Stays readable after the transport has been closed and dropped.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    state: Arc<Mutex<RecordingState>>,
}

impl Recording {
    fn lock(&self) -> MutexGuard<'_, RecordingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Each successful write call, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock().writes.clone()
    }

    /// All written bytes concatenated
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().writes.concat()
    }

    pub fn flushes(&self) -> usize {
        self.lock().flushes
    }

    pub fn flow_control(&self) -> FlowControl {
        self.lock().flow_control
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Transport that appends every write to a [`Recording`]
#[derive(Debug)]
pub struct MemoryTransport {
    recording: Recording,
    fail_writes: bool,
}

impl MemoryTransport {
    pub fn new() -> (Self, Recording) {
        let recording = Recording::default();
        let transport = Self {
            recording: recording.clone(),
            fail_writes: false,
        };
        (transport, recording)
    }

    /// A transport whose writes always fail, as an unplugged cable would
    pub fn failing() -> (Self, Recording) {
        let (mut transport, recording) = Self::new();
        transport.fail_writes = true;
        (transport, recording)
    }
}

impl Transport for MemoryTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, TermicaError> {
        let mut state = self.recording.lock();
        if state.closed {
            return Err(TermicaError::Transport("memory transport is closed".to_string()));
        }
        if self.fail_writes {
            return Err(TermicaError::Transport("write refused".to_string()));
        }
        state.writes.push(data.to_vec());
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), TermicaError> {
        self.recording.lock().flushes += 1;
        Ok(())
    }

    fn set_flow_control(&mut self, mode: FlowControl) -> Result<(), TermicaError> {
        self.recording.lock().flow_control = mode;
        Ok(())
    }

    fn close(&mut self) -> Result<(), TermicaError> {
        self.recording.lock().closed = true;
        Ok(())
    }
}

/// [`Pacer`] that returns immediately and remembers every pause
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn total(&self) -> Duration {
        self.pauses().iter().sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&self, duration: Duration) {
        self.pauses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
