//! # Session Tests
//!
//! End-to-end checks of [`PrinterSession`] against an in-memory transport:
//! the exact bytes each operation produces, the order in which image rows
//! and direct commands reach the printer, and write pacing.

use std::sync::Arc;
use std::time::Duration;

use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;

use termica::TermicaError;
use termica::printer::{ConnectionState, PrinterConfig, PrinterSession};
use termica::protocol::barcode::{BarcodeReadable, BarcodeType};
use termica::protocol::text::{Alignment, CharacterSet, CodeTable};
use termica::transport::{MemoryTransport, Pacer, Recording, RecordingPacer, ThreadSleep, Transport};

/// Bytes written by a successful open with the CSN-A2 defaults
const OPEN_SEQUENCE: [&[u8]; 4] = [
    &[27, 64],
    &[27, 55, 7, 160, 0],
    &[18, 35, (4 << 5) | 14],
    &[27, 61, 1],
];

fn open_session(config: PrinterConfig, pacer: Arc<dyn Pacer>) -> (PrinterSession, Recording) {
    let session = PrinterSession::with_pacer(config, pacer);
    let (transport, recording) = MemoryTransport::new();
    session
        .open_with("mem", move |_| Ok(Box::new(transport) as Box<dyn Transport>))
        .unwrap();
    (session, recording)
}

fn recorded() -> (PrinterSession, Recording, Arc<RecordingPacer>) {
    let pacer = Arc::new(RecordingPacer::new());
    let (session, recording) = open_session(PrinterConfig::CSN_A2, pacer.clone());
    (session, recording, pacer)
}

/// Writes after the open sequence
fn commands_after_open(recording: &Recording) -> Vec<Vec<u8>> {
    recording.writes().split_off(OPEN_SEQUENCE.len())
}

fn is_row_write(write: &[u8]) -> bool {
    write.len() >= 4 && write[..3] == [18, 42, 1]
}

/// Alternating 4-dot black and white runs, flipped every row.
///
/// At threshold 255 black leaves no residual, so the dots come out exact.
fn striped(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / 4 + y) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    })
}

// ============================================================================
// CONNECTION LIFECYCLE
// ============================================================================

#[test]
fn test_open_writes_reset_and_tuning() {
    let (session, recording, _) = recorded();

    assert_eq!(session.state(), ConnectionState::Connected);
    let expected: Vec<Vec<u8>> = OPEN_SEQUENCE.iter().map(|w| w.to_vec()).collect();
    assert_eq!(recording.writes(), expected);
    assert_eq!(recording.flushes(), 1);
}

#[test]
fn test_open_failure_writes_nothing() {
    let session = PrinterSession::with_pacer(PrinterConfig::CSN_A2, Arc::new(RecordingPacer::new()));
    let (_unused, recording) = MemoryTransport::new();

    let result = session.open_with("/dev/ttyNOPE", |_| {
        Err(TermicaError::Connection("no such port".to_string()))
    });

    assert!(matches!(result, Err(TermicaError::Connection(_))));
    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert!(recording.writes().is_empty());
}

#[test]
fn test_open_missing_serial_port_fails() {
    let session = PrinterSession::with_pacer(PrinterConfig::CSN_A2, Arc::new(RecordingPacer::new()));
    let result = session.open("/dev/termica-test-does-not-exist");
    assert!(matches!(result, Err(TermicaError::Connection(_))));
    assert_eq!(session.state(), ConnectionState::Disconnected);
}

#[test]
fn test_connector_sees_configured_settings() {
    let config = PrinterConfig {
        baud_rate: 9600,
        ..PrinterConfig::CSN_A2
    };
    let session = PrinterSession::with_pacer(config, Arc::new(RecordingPacer::new()));
    let (transport, _recording) = MemoryTransport::new();

    session
        .open_with("COM3", move |settings| {
            assert_eq!(settings.port, "COM3");
            assert_eq!(settings.baud_rate, 9600);
            Ok(Box::new(transport) as Box<dyn Transport>)
        })
        .unwrap();
}

#[test]
fn test_writes_while_disconnected_are_dropped() {
    let session = PrinterSession::with_pacer(PrinterConfig::CSN_A2, Arc::new(RecordingPacer::new()));

    session.print_line("nobody home");
    session.set_bold(true);
    session.print_barcode("12345678", BarcodeType::Ean8);
    assert_eq!(session.print_image(&striped(8, 8), 128), 0);

    assert_eq!(session.state(), ConnectionState::Disconnected);
    assert!(!session.is_printing());
}

#[test]
fn test_close_then_write_is_dropped() {
    let (session, recording, _) = recorded();
    session.close();
    session.print_line("after close");

    assert!(recording.is_closed());
    assert_eq!(recording.writes().len(), OPEN_SEQUENCE.len());
}

// ============================================================================
// COMMAND BYTES
// ============================================================================

#[test]
fn test_format_commands() {
    let (session, recording, _) = recorded();

    session.set_align(Alignment::Middle);
    session.set_bold(true);
    session.set_underline(true);
    session.set_reverse(true);
    session.set_upside_down(true);
    session.set_double_width(true);
    session.set_double_width(false);
    session.set_left_margin(60);

    assert_eq!(
        commands_after_open(&recording),
        vec![
            vec![27, 97, 1],
            vec![27, 32, 1, 27, 69, 1],
            vec![27, 45, 1],
            vec![29, 66, 1],
            vec![27, 123, 1],
            vec![27, 14],
            vec![27, 20],
            vec![27, 66, 47],
        ]
    );
}

#[test]
fn test_printer_settings() {
    let (session, recording, _) = recorded();

    session.set_online(false);
    session.set_sleep_time(30);
    session.set_panel_key(false);
    session.set_line_spacing(24);
    session.set_character_set(CharacterSet::Germany);
    session.set_code_table(CodeTable::Cp850);
    session.feed();
    session.feed_lines(3);

    assert_eq!(
        commands_after_open(&recording),
        vec![
            vec![27, 61, 0],
            vec![27, 56, 30, 0xFF],
            vec![27, 99, 53, 0],
            vec![27, 51, 24],
            vec![27, 82, 2],
            vec![27, 116, 2],
            vec![10],
            vec![27, 74, 3],
        ]
    );
}

#[test]
fn test_text_is_sent_verbatim() {
    let (session, recording, _) = recorded();
    session.print_text("Total: ");
    session.print_line("$4.20");

    assert_eq!(
        commands_after_open(&recording),
        vec![b"Total: ".to_vec(), b"$4.20\n".to_vec()]
    );
}

#[test]
fn test_barcode_is_one_contiguous_write() {
    let (session, recording, _) = recorded();

    session.set_barcode_height(60);
    session.set_barcode_width(5);
    session.set_barcode_readable(BarcodeReadable::Below);
    session.print_barcode("12345678", BarcodeType::Ean8);

    let mut barcode = vec![29, 107, 3];
    barcode.extend_from_slice(b"12345678");
    barcode.push(0);

    assert_eq!(
        commands_after_open(&recording),
        vec![vec![29, 104, 60], vec![29, 119, 3], vec![29, 72, 2], barcode]
    );
}

// ============================================================================
// IMAGES AND ORDERING
// ============================================================================

#[test]
fn test_white_image_with_zero_threshold_prints_solid() {
    let (session, recording, _) = recorded();
    let white = RgbImage::from_pixel(8, 1, Rgb([255, 255, 255]));

    assert_eq!(session.print_image(&white, 0), 1);
    session.wait_until_printed();

    assert_eq!(commands_after_open(&recording), vec![vec![18, 42, 1, 1, 0xFF]]);
}

#[test]
fn test_image_rows_written_in_order() {
    let (session, recording, _) = recorded();
    let image = striped(384, 20);

    assert_eq!(session.print_image(&image, 255), 20);
    session.wait_until_printed();

    let rows = commands_after_open(&recording);
    assert_eq!(rows.len(), 20);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), 4 + 48);
        assert_eq!(&row[..4], &[18, 42, 1, 48]);
        let expected = if y % 2 == 0 { 0xF0 } else { 0x0F };
        assert_eq!(row[4], expected, "row {}", y);
    }
    assert!(!session.is_printing());
}

#[test]
fn test_wide_image_is_clipped_to_head() {
    let (session, recording, _) = recorded();
    session.print_image(&RgbImage::from_pixel(500, 2, Rgb([0, 0, 0])), 128);
    session.wait_until_printed();

    for row in commands_after_open(&recording) {
        assert_eq!(row[3], 48);
        assert_eq!(row.len(), 52);
    }
}

#[test]
fn test_barcode_after_image_follows_every_row() {
    // Real sleeps so the worker is still busy when the barcode is issued
    let config = PrinterConfig {
        baud_rate: 115200,
        ..PrinterConfig::CSN_A2
    };
    let (session, recording) = open_session(config, Arc::new(ThreadSleep));

    let rows = session.print_image(&striped(384, 30), 128);
    session.print_barcode("12345678", BarcodeType::Ean8);
    session.print_line("thanks");

    let writes = commands_after_open(&recording);
    assert_eq!(writes.len(), rows + 2);
    assert!(writes[..rows].iter().all(|w| is_row_write(w)));

    let mut barcode = vec![29, 107, 3];
    barcode.extend_from_slice(b"12345678");
    barcode.push(0);
    assert_eq!(writes[rows], barcode);
    assert_eq!(writes[rows + 1], b"thanks\n".to_vec());
}

#[test]
fn test_back_to_back_images_keep_order() {
    let (session, recording, _) = recorded();
    let black = RgbImage::from_pixel(8, 3, Rgb([0, 0, 0]));
    let white = RgbImage::from_pixel(8, 3, Rgb([255, 255, 255]));

    session.print_image(&black, 128);
    session.print_image(&white, 128);
    session.wait_until_printed();

    let payloads: Vec<u8> = commands_after_open(&recording).iter().map(|w| w[4]).collect();
    assert_eq!(payloads, vec![0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00]);
}

#[test]
fn test_close_discards_queued_rows() {
    let config = PrinterConfig {
        baud_rate: 115200,
        ..PrinterConfig::CSN_A2
    };
    let (session, recording) = open_session(config, Arc::new(ThreadSleep));

    let queued = session.print_image(&striped(384, 200), 128);
    session.close();
    session.wait_until_printed();

    let rows = recording.writes().iter().filter(|w| is_row_write(w)).count();
    assert!(rows < queued, "{} of {} rows written", rows, queued);
    assert_eq!(session.state(), ConnectionState::Disconnected);
}

// ============================================================================
// PACING
// ============================================================================

#[test]
fn test_every_write_is_paced() {
    let (session, recording, pacer) = recorded();
    let config = PrinterConfig::CSN_A2;

    session.print_line("paced");
    session.print_image(&striped(64, 4), 128);
    session.wait_until_printed();

    let bytes = recording.bytes().len();
    let settles = config.settle() * 2;
    assert!(pacer.total() >= config.pacing_for(bytes) + settles);

    // One pause per write, plus the two settles around the reset
    assert_eq!(pacer.pauses().len(), recording.writes().len() + 2);
}

#[test]
fn test_pause_matches_write_length() {
    let (session, _recording, pacer) = recorded();
    session.print_line("12345");

    let last = *pacer.pauses().last().unwrap();
    assert_eq!(last, Duration::from_micros(573 * 6));
}
