//! # Termica CLI
//!
//! Command-line interface for serial thermal receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print a line of bold, centered text
//! termica text --bold --align middle "Hello"
//!
//! # Print an image scaled to the head width
//! termica --port /dev/ttyS0 image --fit --threshold 110 logo.png
//!
//! # Print an EAN-8 barcode with digits underneath
//! termica barcode --kind ean8 --readable below 12345678
//!
//! # Show the bytes a demo receipt would send, without a printer
//! termica --dry-run demo
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) to log every command sent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use image::RgbImage;
use image::imageops::{self, FilterType};

use termica::{
    TermicaError,
    printer::{PrinterConfig, PrinterProfile, PrinterSession},
    protocol::{
        barcode::{BarcodeReadable, BarcodeType},
        graphics::HEAD_DOTS,
        text::Alignment,
    },
    transport::{FlowControl, MemoryTransport, Recording, RecordingPacer, Transport},
};

/// Termica - Serial thermal printer utility
#[derive(Parser, Debug)]
#[command(name = "termica")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Serial port the printer is attached to
    #[arg(long, global = true, default_value = "/dev/ttyUSB0")]
    port: String,

    /// JSON file overriding baud rate and head tuning
    #[arg(long, global = true, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Serial flow control
    #[arg(long, global = true, value_enum, default_value = "none")]
    flow_control: FlowArg,

    /// Print the bytes as hex instead of opening the port
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log every command sent
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print text, one argument per line
    Text {
        lines: Vec<String>,

        #[arg(long, value_enum, default_value = "left")]
        align: AlignArg,

        #[arg(long)]
        bold: bool,

        #[arg(long)]
        underline: bool,

        /// White on black
        #[arg(long)]
        reverse: bool,

        #[arg(long)]
        double_width: bool,

        #[arg(long)]
        upside_down: bool,

        /// Blank characters at the start of each line (0-47)
        #[arg(long, default_value = "0")]
        margin: u8,

        /// Lines to feed afterwards
        #[arg(long, default_value = "3")]
        feed: u8,
    },

    /// Feed paper
    Feed {
        #[arg(default_value = "3")]
        lines: u8,
    },

    /// Print a 1D barcode
    Barcode {
        payload: String,

        #[arg(long, value_enum, default_value = "code128")]
        kind: BarcodeArg,

        #[arg(long, value_enum, default_value = "below")]
        readable: ReadableArg,

        /// Bar height in dots
        #[arg(long, default_value = "80")]
        height: u8,

        /// Narrow bar width (2-3)
        #[arg(long, default_value = "3")]
        width: u8,

        #[arg(long, default_value = "3")]
        feed: u8,
    },

    /// Dither and print an image file
    Image {
        path: PathBuf,

        /// Darkness cut-off (0-255); higher prints lighter
        #[arg(long, default_value = "127")]
        threshold: u8,

        /// Scale the image to the print head width
        #[arg(long)]
        fit: bool,

        #[arg(long, default_value = "3")]
        feed: u8,
    },

    /// Print a short receipt exercising styles and a barcode
    Demo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlowArg {
    None,
    Software,
    Hardware,
}

impl From<FlowArg> for FlowControl {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::None => FlowControl::None,
            FlowArg::Software => FlowControl::Software,
            FlowArg::Hardware => FlowControl::Hardware,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlignArg {
    Left,
    Middle,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => Alignment::Left,
            AlignArg::Middle => Alignment::Middle,
            AlignArg::Right => Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BarcodeArg {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Itf,
    Codabar,
    Code93,
    Code128,
    Code11,
    Msi,
}

impl From<BarcodeArg> for BarcodeType {
    fn from(arg: BarcodeArg) -> Self {
        match arg {
            BarcodeArg::UpcA => BarcodeType::UpcA,
            BarcodeArg::UpcE => BarcodeType::UpcE,
            BarcodeArg::Ean13 => BarcodeType::Ean13,
            BarcodeArg::Ean8 => BarcodeType::Ean8,
            BarcodeArg::Code39 => BarcodeType::Code39,
            BarcodeArg::Itf => BarcodeType::Itf,
            BarcodeArg::Codabar => BarcodeType::Codabar,
            BarcodeArg::Code93 => BarcodeType::Code93,
            BarcodeArg::Code128 => BarcodeType::Code128,
            BarcodeArg::Code11 => BarcodeType::Code11,
            BarcodeArg::Msi => BarcodeType::Msi,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReadableArg {
    None,
    Above,
    Below,
    Both,
}

impl From<ReadableArg> for BarcodeReadable {
    fn from(arg: ReadableArg) -> Self {
        match arg {
            ReadableArg::None => BarcodeReadable::None,
            ReadableArg::Above => BarcodeReadable::Above,
            ReadableArg::Below => BarcodeReadable::Below,
            ReadableArg::Both => BarcodeReadable::Both,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TermicaError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.profile {
        Some(path) => PrinterProfile::load(path)?.apply(PrinterConfig::CSN_A2)?,
        None => PrinterConfig::CSN_A2,
    };

    let (session, recording) = connect(&cli, config)?;
    session.set_flow_control(cli.flow_control.into())?;

    match cli.command {
        Commands::Text {
            lines,
            align,
            bold,
            underline,
            reverse,
            double_width,
            upside_down,
            margin,
            feed,
        } => {
            session.set_align(align.into());
            session.set_left_margin(margin);
            session.set_bold(bold);
            session.set_underline(underline);
            session.set_reverse(reverse);
            session.set_double_width(double_width);
            session.set_upside_down(upside_down);
            for line in &lines {
                session.print_line(line);
            }
            session.set_upside_down(false);
            session.set_double_width(false);
            session.set_reverse(false);
            session.set_underline(false);
            session.set_bold(false);
            session.set_left_margin(0);
            session.set_align(Alignment::Left);
            session.feed_lines(feed);
        }

        Commands::Feed { lines } => session.feed_lines(lines),

        Commands::Barcode {
            payload,
            kind,
            readable,
            height,
            width,
            feed,
        } => {
            session.set_barcode_height(height);
            session.set_barcode_width(width);
            session.set_barcode_readable(readable.into());
            session.print_barcode(&payload, kind.into());
            session.feed_lines(feed);
        }

        Commands::Image {
            path,
            threshold,
            fit,
            feed,
        } => {
            let image = load_image(&path, fit)?;
            let rows = session.print_image(&image, threshold);
            println!("Queued {} rows from {}", rows, path.display());
            session.feed_lines(feed);
        }

        Commands::Demo => print_demo(&session),
    }

    session.wait_until_printed();

    match recording {
        Some(recording) => dump_hex(&recording),
        None => println!("Printed successfully!"),
    }

    session.close();
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Open the real port, or a recording transport for `--dry-run`
fn connect(
    cli: &Cli,
    config: PrinterConfig,
) -> Result<(PrinterSession, Option<Recording>), TermicaError> {
    if !cli.dry_run {
        let session = PrinterSession::new(config);
        session.open(&cli.port)?;
        return Ok((session, None));
    }

    let session = PrinterSession::with_pacer(config, Arc::new(RecordingPacer::new()));
    let (transport, recording) = MemoryTransport::new();
    session.open_with(&cli.port, move |_| Ok(Box::new(transport) as Box<dyn Transport>))?;
    Ok((session, Some(recording)))
}

fn load_image(path: &Path, fit: bool) -> Result<RgbImage, TermicaError> {
    let image = image::open(path)
        .map_err(|e| TermicaError::Image(format!("{}: {}", path.display(), e)))?
        .to_rgb8();

    if !fit || image.width() as usize == HEAD_DOTS {
        return Ok(image);
    }

    let width = HEAD_DOTS as u32;
    let height = ((image.height() as u64 * width as u64) / image.width().max(1) as u64).max(1) as u32;
    Ok(imageops::resize(&image, width, height, FilterType::Triangle))
}

fn print_demo(session: &PrinterSession) {
    let now = chrono::Local::now();

    session.set_align(Alignment::Middle);
    session.set_double_width(true);
    session.set_bold(true);
    session.print_line("TERMICA");
    session.set_bold(false);
    session.set_double_width(false);
    session.print_line(&now.format("%Y-%m-%d %H:%M").to_string());
    session.feed();

    session.set_align(Alignment::Left);
    session.print_line("Normal text");
    session.set_bold(true);
    session.print_line("Bold text");
    session.set_bold(false);
    session.set_underline(true);
    session.print_line("Underlined text");
    session.set_underline(false);
    session.set_reverse(true);
    session.print_line(" Reverse text ");
    session.set_reverse(false);
    session.set_upside_down(true);
    session.print_line("Upside down text");
    session.set_upside_down(false);
    session.set_left_margin(4);
    session.print_line("Indented text");
    session.set_left_margin(0);
    session.set_align(Alignment::Right);
    session.print_line("Right aligned");
    session.feed();

    session.set_align(Alignment::Middle);
    session.set_barcode_height(60);
    session.set_barcode_readable(BarcodeReadable::Below);
    session.print_barcode("12345678", BarcodeType::Ean8);
    session.set_align(Alignment::Left);
    session.feed_lines(3);
}

fn dump_hex(recording: &Recording) {
    let bytes = recording.bytes();
    for chunk in bytes.chunks(16) {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{}", hex.join(" "));
    }
    println!("{} bytes in {} writes", bytes.len(), recording.writes().len());
}
