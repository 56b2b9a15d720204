//! # Printer Configuration
//!
//! This module defines the hardware characteristics of the supported printer
//! and the JSON profile format used to override them.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Baud | Interface |
//! |-------|--------------|------|-----------|
//! | CSN-A2 (and clones) | 384 | 19200 | TTL serial |
//!
//! ## Usage
//!
//! ```
//! use termica::printer::PrinterConfig;
//!
//! let config = PrinterConfig::CSN_A2;
//! println!("{} bytes/s", 1_000_000 / config.byte_time().as_micros());
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TermicaError;
use crate::transport::{FlowControl, SerialSettings};

/// # Printer Configuration
///
/// ## Serial Link
///
/// - **baud_rate**: line speed; also fixes the per-byte print time
/// - **timeout_ms**: serial timeout handed to the transport
///
/// ## Head Tuning (applied at open)
///
/// - **heating_dots / heating_time / heating_interval**: see
///   [`commands::heating`](crate::protocol::commands::heating)
/// - **density / break_time**: see
///   [`commands::print_density`](crate::protocol::commands::print_density)
///
/// These defaults are known to print bitmaps cleanly. Aggressive values can
/// make images come out as random text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Serial line speed
    pub baud_rate: u32,

    /// Serial timeout in milliseconds
    pub timeout_ms: u64,

    /// Print head width in dots
    pub head_dots: u16,

    pub heating_dots: u8,
    pub heating_time: u8,
    pub heating_interval: u8,

    pub density: u8,
    pub break_time: u8,

    /// Pause around the reset issued at open, in milliseconds
    pub settle_ms: u64,
}

impl PrinterConfig {
    /// # CSN-A2 58mm Serial Thermal Printer
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Paper width | 58mm |
    /// | Print width | 48mm (384 dots) |
    /// | Interface | TTL serial, 19200 8N1 |
    pub const CSN_A2: Self = Self {
        name: "CSN-A2",
        baud_rate: 19200,
        timeout_ms: 1000,
        head_dots: 384,
        heating_dots: 7,
        heating_time: 160,
        heating_interval: 0,
        density: 14,
        break_time: 4,
        settle_ms: 50,
    };

    /// Time for one byte on the wire: 11 bit times (start, 8 data, stop,
    /// and one of slack), rounded to the nearest microsecond.
    ///
    /// ```
    /// use termica::printer::PrinterConfig;
    ///
    /// assert_eq!(PrinterConfig::CSN_A2.byte_time().as_micros(), 573);
    /// ```
    pub fn byte_time(&self) -> Duration {
        let baud = self.baud_rate.max(1) as u64;
        Duration::from_micros((11 * 1_000_000 + baud / 2) / baud)
    }

    /// Pause owed after writing `bytes` bytes
    #[inline]
    pub fn pacing_for(&self, bytes: usize) -> Duration {
        self.byte_time() * bytes as u32
    }

    #[inline]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Serial parameters for opening `port` with this configuration
    pub fn serial_settings(&self, port: &str) -> SerialSettings {
        SerialSettings {
            port: port.to_string(),
            baud_rate: self.baud_rate,
            timeout: self.timeout(),
            flow_control: FlowControl::None,
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::CSN_A2
    }
}

// ============================================================================
// PRINTER PROFILE
// ============================================================================

/// Overrides for a [`PrinterConfig`], loaded from JSON.
///
/// Every field is optional; missing fields keep the base value.
///
/// ```json
/// { "baud_rate": 9600, "heating_time": 120, "density": 10 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrinterProfile {
    pub baud_rate: Option<u32>,
    pub timeout_ms: Option<u64>,
    pub heating_dots: Option<u8>,
    pub heating_time: Option<u8>,
    pub heating_interval: Option<u8>,
    pub density: Option<u8>,
    pub break_time: Option<u8>,
    pub settle_ms: Option<u64>,
}

impl PrinterProfile {
    pub fn from_json(json: &str) -> Result<Self, TermicaError> {
        serde_json::from_str(json)
            .map_err(|e| TermicaError::Config(format!("Invalid profile: {}", e)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TermicaError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| TermicaError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply the overrides on top of `base`, rejecting values the printer
    /// cannot take.
    pub fn apply(&self, base: PrinterConfig) -> Result<PrinterConfig, TermicaError> {
        let config = PrinterConfig {
            baud_rate: self.baud_rate.unwrap_or(base.baud_rate),
            timeout_ms: self.timeout_ms.unwrap_or(base.timeout_ms),
            heating_dots: self.heating_dots.unwrap_or(base.heating_dots),
            heating_time: self.heating_time.unwrap_or(base.heating_time),
            heating_interval: self.heating_interval.unwrap_or(base.heating_interval),
            density: self.density.unwrap_or(base.density),
            break_time: self.break_time.unwrap_or(base.break_time),
            settle_ms: self.settle_ms.unwrap_or(base.settle_ms),
            ..base
        };

        if config.baud_rate == 0 {
            return Err(TermicaError::Config("baud_rate must be non-zero".to_string()));
        }
        if config.heating_time < 3 {
            return Err(TermicaError::Config(format!(
                "heating_time must be at least 3, got {}",
                config.heating_time
            )));
        }
        if config.density > 31 {
            return Err(TermicaError::Config(format!(
                "density must be 0-31, got {}",
                config.density
            )));
        }
        if config.break_time > 7 {
            return Err(TermicaError::Config(format!(
                "break_time must be 0-7, got {}",
                config.break_time
            )));
        }

        Ok(config)
    }
}

// ============================================================================
// TESTS
// ============================================================================
