//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! The historical interface spelled the destination flag `-csv` with a single
//! dash; [`normalize_legacy_flags`] rewrites it to `--csv` before clap sees the
//! arguments, so both spellings work.

use clap::{Parser, ValueEnum};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::ldif::{DecodeErrorPolicy, EmptyRecordPolicy, ParseOptions};

/// Suffix appended to the source path when no destination is given.
pub const DEFAULT_CSV_SUFFIX: &str = ".csv";

/// What to do when an attribute value cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnDecodeError {
    /// Drop the attribute line with a warning and continue
    Skip,
    /// Stop without writing any output
    Abort,
}

impl From<OnDecodeError> for DecodeErrorPolicy {
    fn from(value: OnDecodeError) -> Self {
        match value {
            OnDecodeError::Skip => DecodeErrorPolicy::Skip,
            OnDecodeError::Abort => DecodeErrorPolicy::Abort,
        }
    }
}

/// Command-line arguments for the converter.
///
/// Use the `validate()` method after parsing to ensure the arguments are usable.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use ldif_to_csv::cli::{normalize_legacy_flags, Args};
///
/// let args = Args::parse_from(normalize_legacy_flags(std::env::args_os()));
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "ldif-to-csv")]
#[command(about = "Convert an LDIF file to CSV")]
#[command(version)]
pub struct Args {
    /// Path to the source LDIF file
    #[arg(value_name = "LDIF path")]
    pub source: PathBuf,

    /// Path to the output CSV file (default: <LDIF path>.csv, next to the source)
    #[arg(long = "csv", value_name = "CSV path")]
    pub csv: Option<PathBuf>,

    /// Comma separated list of attributes to export (default: all attributes)
    #[arg(short = 'a', long = "attributes", value_delimiter = ',')]
    pub attributes: Vec<String>,

    /// Policy for attribute values that cannot be decoded
    #[arg(long, value_enum, default_value = "skip")]
    pub on_decode_error: OnDecodeError,

    /// Emit an empty row for every blank line that closes an empty record
    #[arg(long, default_value = "false")]
    pub keep_empty_records: bool,

    /// Increase log verbosity (-v: info, -vv: debug); RUST_LOG takes precedence
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Validate the parsed arguments.
    ///
    /// - the source path must not be empty
    /// - the destination must differ from the source
    /// - when `-a` is given it must name at least one attribute, and names may
    ///   not contain `:` or `;` (options are stripped from LDIF names, so such a
    ///   column could never match)
    pub fn validate(&self) -> Result<(), String> {
        if self.source.as_os_str().is_empty() {
            return Err("LDIF path must not be empty".to_string());
        }

        if self.destination() == self.source {
            return Err(format!(
                "CSV path must differ from the LDIF path: {}",
                self.source.display()
            ));
        }

        if !self.attributes.is_empty() {
            if self.attributes.iter().all(|name| name.trim().is_empty()) {
                return Err("-a requires at least one attribute name".to_string());
            }

            if let Some(name) = self
                .attributes
                .iter()
                .find(|name| name.contains(':') || name.contains(';'))
            {
                return Err(format!(
                    "Invalid attribute name '{}': names may not contain ':' or ';'",
                    name
                ));
            }
        }

        Ok(())
    }

    /// The CSV destination, defaulting to the source path plus `.csv`.
    pub fn destination(&self) -> PathBuf {
        match &self.csv {
            Some(path) => path.clone(),
            None => {
                let mut path = self.source.clone().into_os_string();
                path.push(DEFAULT_CSV_SUFFIX);
                PathBuf::from(path)
            }
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            decode_errors: self.on_decode_error.into(),
            empty_records: if self.keep_empty_records {
                EmptyRecordPolicy::Keep
            } else {
                EmptyRecordPolicy::Suppress
            },
        }
    }

    /// Default tracing filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Options whose next argument is their value.
const VALUE_FLAGS: &[&str] = &["-csv", "--csv", "-a", "--attributes", "--on-decode-error"];

/// Rewrites the single-dash `-csv` flag to `--csv`.
///
/// Only an exact `-csv` in a flag position is rewritten. The argument after a
/// value-taking option (`-csv`, `--csv`, `-a`, `--attributes`,
/// `--on-decode-error`) is that option's value and stays as given, so
/// `-a -csv` keeps `-csv` as the attribute list. Nothing after `--` is
/// touched, and `-csv=path` is never rewritten.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expects_value = false;
    let mut options_ended = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            // argv[0] is the program name
            if index == 0 || options_ended {
                return arg;
            }
            if expects_value {
                expects_value = false;
                return arg;
            }
            if arg.as_os_str() == OsStr::new("--") {
                options_ended = true;
                return arg;
            }

            expects_value = takes_value(&arg);
            if arg.as_os_str() == OsStr::new("-csv") {
                OsString::from("--csv")
            } else {
                arg
            }
        })
        .collect()
}

/// Whether `arg` is an option that consumes the following argument.
///
/// Covers the short cluster form too: `-va` ends in `-a`, so the next
/// argument is the attribute list.
fn takes_value(arg: &OsStr) -> bool {
    let Some(arg) = arg.to_str() else {
        return false;
    };
    if VALUE_FLAGS.contains(&arg) {
        return true;
    }
    match arg.strip_prefix('-') {
        Some(cluster) if !cluster.starts_with('-') => cluster
            .strip_suffix('a')
            .is_some_and(|rest| rest.chars().all(|c| c == 'v')),
        _ => false,
    }
}
