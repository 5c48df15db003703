//! Error module
//!
//! Defines custom error types using `thiserror` for the LDIF to CSV converter.
//! [`LdifCsvError`] covers everything that ends a run; [`AttributeError`] is the
//! per-line failure raised while decoding a single attribute value, which the
//! record assembler may skip or escalate depending on the configured policy.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to decode the value of a single attribute line.
#[derive(Error, Debug)]
pub enum AttributeError {
    /// The `name:: value` form did not carry valid base64.
    #[error("invalid base64 value: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The base64 payload decoded to bytes that are not UTF-8 text.
    #[error("decoded value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// The main error type for the converter.
///
/// # Error Categories
///
/// - **Argument errors**: invalid flag combinations detected after parsing
/// - **Source errors**: the LDIF file is missing or unreadable
/// - **Data errors**: an attribute value could not be decoded and the
///   decode policy is `abort`
/// - **Write errors**: the CSV destination could not be written
///
/// # Example
///
/// ```rust,ignore
/// use ldif_to_csv::error::LdifCsvError;
///
/// fn example() -> Result<(), LdifCsvError> {
///     let text = std::fs::read_to_string("people.ldif")?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum LdifCsvError {
    /// Invalid command-line argument error.
    ///
    /// Raised by `Args::validate()` when arguments parse but do not form a
    /// usable configuration (e.g. destination equal to the source).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The source LDIF file does not exist.
    #[error("LDIF file '{}' doesn't exist", .0.display())]
    SourceNotFound(PathBuf),

    /// An attribute value could not be decoded.
    ///
    /// Only surfaced when the decode policy is `abort`; under `skip` the line is
    /// dropped and counted instead.
    #[error("Line {line}: cannot decode attribute '{attribute}': {source}")]
    Decode {
        /// Physical line number the logical line started on.
        line: usize,
        /// Attribute name with options stripped.
        attribute: String,
        #[source]
        source: AttributeError,
    },

    /// General I/O error, typically while reading the source file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV destination could not be written.
    #[error("Cannot write CSV file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
