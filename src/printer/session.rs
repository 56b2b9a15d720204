//! # Printer Session
//!
//! The facade callers drive: opens and closes the connection, sends
//! formatting commands immediately, and hands dithered image rows to the
//! [`PrintQueue`] worker.
//!
//! ## Ordering
//!
//! Rows are written by the worker thread, commands by the caller's thread.
//! Before any direct write the session waits for the image queue to drain,
//! then writes the whole command under the link lock. So
//!
//! ```text
//! print_image(logo); print_line("Thanks!");
//! ```
//!
//! always prints the text below the logo, and a barcode's header, payload,
//! and terminator always reach the printer back to back.
//!
//! ## Error Policy
//!
//! - `open` reports a connection failure once, leaving the session
//!   Disconnected
//! - any write while Disconnected is silently discarded
//! - write failures while Connected are logged and the bytes dropped
//! - the printer has no way to report paper-out or overheating
//!
//! ## Example
//!
//! ```no_run
//! use termica::printer::{PrinterConfig, PrinterSession};
//! use termica::protocol::text::Alignment;
//!
//! let session = PrinterSession::new(PrinterConfig::CSN_A2);
//! session.open("/dev/ttyUSB0")?;
//!
//! session.set_align(Alignment::Middle);
//! session.set_bold(true);
//! session.print_line("HELLO");
//! session.set_bold(false);
//! session.feed_lines(3);
//!
//! session.close();
//! # Ok::<(), termica::TermicaError>(())
//! ```

use std::sync::Arc;

use image::RgbImage;
use log::{debug, info, warn};

use super::config::PrinterConfig;
use super::link::Link;
use super::queue::{PrintQueue, WorkerState};
use crate::error::TermicaError;
use crate::protocol::barcode::{self, BarcodeReadable, BarcodeType};
use crate::protocol::commands;
use crate::protocol::text::{self, Alignment, CharacterSet, CodeTable};
use crate::render::dither;
use crate::transport::{FlowControl, Pacer, SerialSettings, SerialTransport, ThreadSleep, Transport};

/// Connection state of a [`PrinterSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

pub struct PrinterSession {
    config: PrinterConfig,
    link: Arc<Link>,
    queue: Arc<PrintQueue>,
}

impl PrinterSession {
    /// A disconnected session that paces by sleeping
    pub fn new(config: PrinterConfig) -> Self {
        Self::with_pacer(config, Arc::new(ThreadSleep))
    }

    /// A disconnected session pacing through `pacer`
    pub fn with_pacer(config: PrinterConfig, pacer: Arc<dyn Pacer>) -> Self {
        let link = Arc::new(Link::new(config.byte_time(), pacer));
        let queue = PrintQueue::new(Arc::clone(&link));
        Self {
            config,
            link,
            queue,
        }
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        if self.link.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Whether image rows are still being written
    pub fn is_printing(&self) -> bool {
        self.queue.state() == WorkerState::Running
    }

    // ========================================================================
    // CONNECTION LIFECYCLE
    // ========================================================================

    /// Open the serial port `port` and bring the printer up.
    pub fn open(&self, port: &str) -> Result<(), TermicaError> {
        self.open_with(port, |settings| {
            let transport = SerialTransport::open(settings)?;
            Ok(Box::new(transport) as Box<dyn Transport>)
        })
    }

    /// Open through a caller-supplied connector.
    ///
    /// On failure the session stays Disconnected and nothing is written. On
    /// success the printer is reset, tuned with the configured heating and
    /// density, set online, and the transport flushed. An existing
    /// connection is closed first.
    pub fn open_with<F>(&self, port: &str, connect: F) -> Result<(), TermicaError>
    where
        F: FnOnce(&SerialSettings) -> Result<Box<dyn Transport>, TermicaError>,
    {
        if self.is_connected() {
            self.close();
        }

        let settings = self.config.serial_settings(port);
        let transport = connect(&settings).map_err(|e| match e {
            TermicaError::Connection(_) => e,
            other => TermicaError::Connection(format!("{}: {}", port, other)),
        })?;
        self.link.attach(transport);
        info!("connected to {} on {} at {} baud", self.config.name, port, settings.baud_rate);

        let config = self.config;
        self.link.pause(config.settle());
        self.reset();
        self.link.pause(config.settle());
        self.set_heating(config.heating_dots, config.heating_time, config.heating_interval);
        self.set_print_density(config.density, config.break_time);
        self.set_online(true);
        self.flush();

        Ok(())
    }

    /// Release the transport. Queued rows not yet written are discarded.
    ///
    /// Does nothing when already Disconnected.
    pub fn close(&self) {
        let dropped = self.queue.clear();
        if let Some(mut transport) = self.link.detach() {
            if let Err(e) = transport.close() {
                warn!("error closing transport: {}", e);
            }
            info!("disconnected ({} queued rows discarded)", dropped);
        }
    }

    /// Block until every queued image row has been written
    pub fn wait_until_printed(&self) {
        self.queue.wait_idle();
    }

    pub fn flush(&self) {
        self.queue.wait_idle();
        if let Some(Err(e)) = self.link.with_transport(|t| t.flush()) {
            warn!("flush failed: {}", e);
        }
    }

    /// Change serial flow control on the open port. No-op when Disconnected.
    pub fn set_flow_control(&self, mode: FlowControl) -> Result<(), TermicaError> {
        self.queue.wait_idle();
        self.link
            .with_transport(|t| t.set_flow_control(mode))
            .unwrap_or(Ok(()))
    }

    fn send(&self, bytes: &[u8]) {
        self.queue.wait_idle();
        debug!("send {:?}", bytes);
        self.link.write(bytes);
    }

    // ========================================================================
    // PRINTER CONTROL
    // ========================================================================

    pub fn reset(&self) {
        self.send(&commands::reset());
    }

    pub fn set_online(&self, online: bool) {
        self.send(&commands::online(online));
    }

    pub fn set_heating(&self, dots: u8, time: u8, interval: u8) {
        self.send(&commands::heating(dots, time, interval));
    }

    pub fn set_print_density(&self, density: u8, break_time: u8) {
        self.send(&commands::print_density(density, break_time));
    }

    /// Seconds of inactivity before the printer sleeps
    pub fn set_sleep_time(&self, seconds: u8) {
        self.send(&commands::sleep_time(seconds));
    }

    pub fn set_panel_key(&self, enabled: bool) {
        self.send(&commands::panel_key(enabled));
    }

    pub fn feed(&self) {
        self.send(&commands::feed());
    }

    pub fn feed_lines(&self, lines: u8) {
        self.send(&commands::feed_lines(lines));
    }

    pub fn set_line_spacing(&self, dots: u8) {
        self.send(&commands::line_spacing(dots));
    }

    // ========================================================================
    // TEXT FORMATTING
    // ========================================================================

    pub fn set_align(&self, alignment: Alignment) {
        self.send(&text::align(alignment));
    }

    pub fn set_bold(&self, on: bool) {
        self.send(&text::bold(on));
    }

    pub fn set_underline(&self, on: bool) {
        self.send(&text::underline(on));
    }

    pub fn set_reverse(&self, on: bool) {
        self.send(&text::reverse(on));
    }

    pub fn set_upside_down(&self, on: bool) {
        self.send(&text::upside_down(on));
    }

    pub fn set_double_width(&self, on: bool) {
        self.send(&text::double_width(on));
    }

    /// Blank characters at the start of each line, clamped to 0-47
    pub fn set_left_margin(&self, chars: u8) {
        self.send(&text::left_margin(chars));
    }

    pub fn set_character_set(&self, set: CharacterSet) {
        self.send(&text::character_set(set));
    }

    pub fn set_code_table(&self, table: CodeTable) {
        self.send(&text::code_table(table));
    }

    /// Send text without a line terminator
    pub fn print_text(&self, text: &str) {
        self.send(text.as_bytes());
    }

    /// Send text followed by `\n`
    pub fn print_line(&self, text: &str) {
        let mut line = Vec::with_capacity(text.len() + 1);
        line.extend_from_slice(text.as_bytes());
        line.push(commands::LF);
        self.send(&line);
    }

    // ========================================================================
    // BARCODES
    // ========================================================================

    pub fn set_barcode_height(&self, dots: u8) {
        self.send(&barcode::height(dots));
    }

    pub fn set_barcode_width(&self, module: u8) {
        self.send(&barcode::width(module));
    }

    pub fn set_barcode_readable(&self, position: BarcodeReadable) {
        self.send(&barcode::readable(position));
    }

    /// Header, payload, and NUL terminator go out as one write
    pub fn print_barcode(&self, payload: &str, kind: BarcodeType) {
        self.send(&barcode::print(payload.as_bytes(), kind));
    }

    // ========================================================================
    // IMAGES
    // ========================================================================

    /// Dither `image` and queue its rows for the worker.
    ///
    /// Returns as soon as the rows are queued, with the number of rows.
    /// Nothing is dithered or queued while Disconnected.
    pub fn print_image(&self, image: &RgbImage, threshold: u8) -> usize {
        if !self.is_connected() {
            return 0;
        }

        let rows = dither::atkinson(image, threshold);
        let count = rows.len();
        debug!(
            "queueing {}x{} image as {} rows (threshold {})",
            image.width(),
            image.height(),
            count,
            threshold
        );
        self.queue.enqueue_all(rows);
        count
    }
}

impl Drop for PrinterSession {
    fn drop(&mut self) {
        self.close();
    }
}
