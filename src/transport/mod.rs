//! # Printer Transport Layer
//!
//! This module defines what the session needs from the physical link and
//! provides the serial backend.
//!
//! ## Pieces
//!
//! - [`Transport`]: an open, writable byte link to the printer
//! - [`SerialSettings`]: how the link is opened
//! - [`Pacer`]: blocking delay source used to pace writes
//! - [`serial`]: [`SerialTransport`] over the `serialport` crate
//! - [`memory`]: recording transport and pacer for dry runs and tests
//!
//! The printer never answers, so a transport is write-only.

pub mod memory;
pub mod serial;

use std::thread;
use std::time::Duration;

use crate::error::TermicaError;

pub use memory::{MemoryTransport, Recording, RecordingPacer};
pub use serial::SerialTransport;

/// Flow control on the serial line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowControl {
    #[default]
    None,
    /// XON/XOFF
    Software,
    /// RTS/CTS
    Hardware,
}

/// Parameters used to open a serial link.
///
/// Framing is always 8 data bits, no parity, one stop bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    /// Port identifier, e.g. `/dev/ttyUSB0` or `COM3`
    pub port: String,
    pub baud_rate: u32,
    pub timeout: Duration,
    pub flow_control: FlowControl,
}

/// An open byte link to the printer.
///
/// Implementations must be `Send`: the print queue worker writes rows from
/// its own thread.
pub trait Transport: Send {
    /// Write all of `data`, returning the number of bytes written.
    fn write(&mut self, data: &[u8]) -> Result<usize, TermicaError>;

    /// Block until buffered output has been handed to the device.
    fn flush(&mut self) -> Result<(), TermicaError>;

    fn set_flow_control(&mut self, mode: FlowControl) -> Result<(), TermicaError>;

    /// Release the underlying device. Further writes fail.
    fn close(&mut self) -> Result<(), TermicaError>;
}

/// Source of blocking delays.
///
/// Writes are followed by a pause sized to the printer's print speed so the
/// host never overruns the printer's small input buffer.
pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration);
}

/// [`Pacer`] that sleeps the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleep;

impl Pacer for ThreadSleep {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}
