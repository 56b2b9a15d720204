//! # Shared Printer Link
//!
//! The one serial line to the printer, shared between the calling thread and
//! the print queue worker.
//!
//! Every write goes through [`Link::write`], which holds a single mutex for
//! the write **and** the pause that follows it. A second writer therefore
//! cannot start until the printer has had time to consume the previous bytes,
//! and a command is never split by another thread's bytes.
//!
//! While no transport is attached, writes are discarded without error or log:
//! printing to a disconnected session is a no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::warn;

use crate::error::TermicaError;
use crate::transport::{Pacer, Transport};

pub struct Link {
    transport: Mutex<Option<Box<dyn Transport>>>,
    pacer: Arc<dyn Pacer>,
    byte_time: Duration,
}

impl Link {
    pub fn new(byte_time: Duration, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            transport: Mutex::new(None),
            pacer,
            byte_time,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn Transport>>> {
        self.transport.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a freshly opened transport, returning any previous one
    pub fn attach(&self, transport: Box<dyn Transport>) -> Option<Box<dyn Transport>> {
        self.lock().replace(transport)
    }

    /// Remove the transport; later writes are discarded
    pub fn detach(&self) -> Option<Box<dyn Transport>> {
        self.lock().take()
    }

    pub fn is_connected(&self) -> bool {
        self.lock().is_some()
    }

    /// Write `data` as one unit and pace for its length.
    ///
    /// Returns the bytes accepted by the transport: 0 when disconnected or
    /// when the transport refused the write. A refused write is logged and
    /// the bytes are lost; the pause still applies since the printer may
    /// have received part of them.
    pub fn write(&self, data: &[u8]) -> usize {
        let mut guard = self.lock();
        let Some(transport) = guard.as_mut() else {
            return 0;
        };

        let written = match transport.write(data) {
            Ok(n) => n,
            Err(e) => {
                warn!("dropped {} bytes: {}", data.len(), e);
                0
            }
        };
        self.pacer.pause(self.byte_time * data.len() as u32);
        written
    }

    /// Run `f` against the attached transport under the write lock.
    ///
    /// Returns `None` when disconnected.
    pub fn with_transport<R>(
        &self,
        f: impl FnOnce(&mut dyn Transport) -> Result<R, TermicaError>,
    ) -> Option<Result<R, TermicaError>> {
        let mut guard = self.lock();
        guard.as_mut().map(|transport| f(transport.as_mut()))
    }

    /// Block for `duration` through the link's pacer
    pub fn pause(&self, duration: Duration) {
        self.pacer.pause(duration);
    }
}
