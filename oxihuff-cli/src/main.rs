//! OxiHuff CLI
//!
//! Encodes a file into a Huffman container, or decodes a container back into
//! the original bytes.

mod commands;
mod utils;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use commands::{cmd_decode, cmd_encode};
use oxihuff::{HuffmanConfig, MAX_CODE_LENGTH};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use utils::ReportMode;

#[derive(Parser, Debug)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust byte-oriented Huffman codec")]
#[command(long_about = "
OxiHuff compresses a file with a static Huffman code built from its byte
frequencies, and restores the exact original from the resulting container.

Examples:
  oxihuff encode notes.txt notes.huf
  oxihuff decode notes.huf notes.txt
  oxihuff --json ENCODE image.bmp image.huf
")]
struct Cli {
    /// What to do with the input file
    #[arg(value_enum, ignore_case = true)]
    action: Action,

    /// File to read
    input: PathBuf,

    /// File to write
    output: PathBuf,

    /// Log verbosity, written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Print a one-line summary after the run
    #[arg(short, long)]
    verbose: bool,

    /// Print the summary as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    /// Longest code the encoder may assign, in bits
    #[arg(
        long,
        default_value_t = MAX_CODE_LENGTH,
        value_parser = clap::value_parser!(u8).range(1..=MAX_CODE_LENGTH as i64)
    )]
    max_code_length: u8,
}

/// Codec direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Compress a file into a container
    Encode,
    /// Restore a file from a container
    Decode,
}

/// Log level for the stderr subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum LogLevel {
    /// Per-code detail
    Trace,
    /// Sizes of each stage
    Debug,
    /// One line per run
    Info,
    /// Problems only (default)
    #[default]
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn init_logging(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install log subscriber: {}", e);
    }
}

fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                println!("{}", Cli::command().render_usage());
                std::process::exit(1);
            }
        },
    }
}

fn main() {
    let cli = parse_args();
    init_logging(cli.log_level);

    let mode = ReportMode::from_flags(cli.verbose, cli.json);
    let result = match cli.action {
        Action::Encode => cmd_encode(
            &cli.input,
            &cli.output,
            &HuffmanConfig::new(cli.max_code_length),
            mode,
        ),
        Action::Decode => cmd_decode(&cli.input, &cli.output, mode),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
