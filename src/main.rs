//! ldif-to-csv - Convert LDIF directory exports to CSV
//!
//! Reads an LDIF file, collects its records and writes them as CSV with one
//! column per attribute. Columns default to every attribute in order of first
//! appearance; `-a` selects and orders them explicitly.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 2 | Usage error reported by the argument parser |
//! | 3 | File I/O error (missing source, unreadable input, unwritable output) |
//! | 4 | Data error (undecodable value with `--on-decode-error abort`) |

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ldif_to_csv::cli::{normalize_legacy_flags, Args};
use ldif_to_csv::converter::Converter;
use ldif_to_csv::error::LdifCsvError;

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for undecodable input data
const EXIT_DATA_ERROR: u8 = 4;

fn main() -> ExitCode {
    // clap prints usage and exits with code 2 on malformed arguments
    let args = Args::parse_from(normalize_legacy_flags(std::env::args_os()));

    init_logging(args.log_level());

    if let Err(e) = args.validate() {
        let error = LdifCsvError::InvalidArgument(e);
        eprintln!("Error: {}", error);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(error_to_exit_code(&error));
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` overrides the verbosity flags.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), LdifCsvError> {
    let destination = args.destination();
    eprintln!("Converting {:?} to {:?}", args.source, destination);

    let converter = Converter::new(args.parse_options(), args.attributes.clone());
    let stats = converter.convert(&args.source, &destination)?;

    println!("{}", stats);

    if stats.parse.skipped_attributes > 0 {
        eprintln!(
            "Conversion complete with {} undecodable values skipped.",
            stats.parse.skipped_attributes
        );
    } else {
        eprintln!("Conversion complete. {} records written.", stats.records);
    }

    Ok(())
}

/// Map errors to exit codes
fn error_to_exit_code(error: &LdifCsvError) -> u8 {
    match error {
        LdifCsvError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        LdifCsvError::SourceNotFound(_) => EXIT_IO_ERROR,
        LdifCsvError::Io(_) => EXIT_IO_ERROR,
        LdifCsvError::Write { .. } => EXIT_IO_ERROR,
        LdifCsvError::Decode { .. } => EXIT_DATA_ERROR,
    }
}
