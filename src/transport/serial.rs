//! # Serial Transport
//!
//! Drives the printer over a serial port (USB-serial adapter or a native
//! UART) using the `serialport` crate.
//!
//! ## Line Configuration
//!
//! - **8 data bits, no parity, 1 stop bit**: the only framing the printer
//!   accepts
//! - **Baud**: from [`SerialSettings`], 19200 for the stock printer
//! - **Flow control**: none at open time; the printer's DTR/XON support
//!   varies by firmware so it can be switched afterwards
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use termica::transport::{FlowControl, SerialSettings, SerialTransport, Transport};
//!
//! let settings = SerialSettings {
//!     port: "/dev/ttyUSB0".to_string(),
//!     baud_rate: 19200,
//!     timeout: Duration::from_millis(1000),
//!     flow_control: FlowControl::None,
//! };
//! let mut transport = SerialTransport::open(&settings)?;
//! transport.write(&[27, 64])?;
//!
//! # Ok::<(), termica::TermicaError>(())
//! ```

use std::io::Write;

use log::debug;
use serialport::{DataBits, Parity, SerialPort, StopBits};

use super::{FlowControl, SerialSettings, Transport};
use crate::error::TermicaError;

/// # Serial Printer Transport
///
/// Owns one open serial port. Dropping the transport closes the port.
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
    name: String,
}

impl SerialTransport {
    /// Open the serial port described by `settings`.
    ///
    /// ## Errors
    ///
    /// Returns [`TermicaError::Connection`] if:
    /// - The port doesn't exist
    /// - Permission denied (may need the dialout group)
    /// - The baud rate is not supported by the device
    pub fn open(settings: &SerialSettings) -> Result<Self, TermicaError> {
        let port = serialport::new(settings.port.as_str(), settings.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(settings.flow_control.into())
            .timeout(settings.timeout)
            .open()
            .map_err(|e| {
                TermicaError::Connection(format!("Failed to open {}: {}", settings.port, e))
            })?;

        debug!("opened {} at {} baud", settings.port, settings.baud_rate);

        Ok(Self {
            port: Some(port),
            name: settings.port.clone(),
        })
    }

    fn port(&mut self) -> Result<&mut Box<dyn SerialPort>, TermicaError> {
        self.port
            .as_mut()
            .ok_or_else(|| TermicaError::Transport(format!("{} is closed", self.name)))
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, TermicaError> {
        self.port()?
            .write_all(data)
            .map_err(|e| TermicaError::Transport(format!("Write failed: {}", e)))?;
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), TermicaError> {
        self.port()?
            .flush()
            .map_err(|e| TermicaError::Transport(format!("Flush failed: {}", e)))
    }

    fn set_flow_control(&mut self, mode: FlowControl) -> Result<(), TermicaError> {
        self.port()?
            .set_flow_control(mode.into())
            .map_err(|e| TermicaError::Transport(format!("Flow control failed: {}", e)))
    }

    fn close(&mut self) -> Result<(), TermicaError> {
        if self.port.take().is_some() {
            debug!("closed {}", self.name);
        }
        Ok(())
    }
}

impl From<FlowControl> for serialport::FlowControl {
    fn from(mode: FlowControl) -> Self {
        match mode {
            FlowControl::None => serialport::FlowControl::None,
            FlowControl::Software => serialport::FlowControl::Software,
            FlowControl::Hardware => serialport::FlowControl::Hardware,
        }
    }
}
