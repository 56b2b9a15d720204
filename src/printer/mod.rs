//! # Printer Module
//!
//! Everything above the byte builders: hardware configuration, the shared
//! serial link, the image row queue, and the session facade.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware specifications and JSON profiles
//! - [`link`]: Paced, lock-protected writes to the transport
//! - [`queue`]: Image row FIFO and its worker thread
//! - [`session`]: [`PrinterSession`], the public facade

pub mod config;
pub mod link;
pub mod queue;
pub mod session;

pub use config::{PrinterConfig, PrinterProfile};
pub use queue::{PrintQueue, WorkerState};
pub use session::{ConnectionState, PrinterSession};
