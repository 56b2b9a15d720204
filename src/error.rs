//! # Error Types
//!
//! This module defines error types used throughout the termica library.
//!
//! The printer protocol has no acknowledgement channel, so nothing here can
//! describe paper-out, overheating, or a rejected command. Those conditions
//! are physically invisible to the host.

use thiserror::Error;

/// Main error type for termica operations
#[derive(Debug, Error)]
pub enum TermicaError {
    /// The serial transport could not be acquired
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Transport-level errors (write, flush, flow control)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Image loading or conversion error
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid printer profile
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
