//! Attribute line parsing.
//!
//! An attribute line has one of three shapes:
//!
//! | Form              | Meaning                                   |
//! |-------------------|-------------------------------------------|
//! | `name: value`     | plain value                               |
//! | `name:: dmFsdWU=` | base64-encoded UTF-8 value                |
//! | `name:< url`      | URL reference, kept verbatim (not fetched)|
//!
//! The name may carry options (`cn;lang-de`) which are dropped. Every value
//! comes out with its double quotes doubled so it can sit inside a quoted CSV
//! cell.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};

use crate::error::AttributeError;

/// Marker following the colon for a URL-reference value.
pub const URL_MARKER: char = '<';

/// Marker following the colon for a base64 value.
pub const BASE64_MARKER: char = ':';

/// Separator between an attribute name and its options.
pub const OPTION_SEPARATOR: char = ';';

/// How the value was written in the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEncoding {
    Plain,
    Url,
    Base64,
}

/// A successfully parsed attribute line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeLine {
    /// Attribute name, trimmed, options removed, case preserved.
    pub name: String,
    /// Decoded value with `"` already doubled.
    pub value: String,
    pub encoding: ValueEncoding,
}

/// A line whose name parsed but whose value could not be decoded.
///
/// The name is kept so callers can report which attribute was dropped.
#[derive(Debug)]
pub struct AttributeFailure {
    pub name: String,
    pub error: AttributeError,
}

/// Escapes a value for embedding in a quoted CSV cell by doubling `"`.
///
/// ```
/// use ldif_to_csv::ldif::attribute::escape_quotes;
///
/// assert_eq!(escape_quotes(r#"say "hi""#), r#"say ""hi"""#);
/// ```
#[must_use]
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Strips attribute options: `cn;lang-en` becomes `cn`.
#[must_use]
pub fn strip_options(name: &str) -> &str {
    match name.find(OPTION_SEPARATOR) {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Decodes a raw value according to its marker.
fn decode_value(raw: &str) -> Result<(String, ValueEncoding), AttributeError> {
    if let Some(rest) = raw.strip_prefix(URL_MARKER) {
        Ok((rest.trim().to_string(), ValueEncoding::Url))
    } else if let Some(rest) = raw.strip_prefix(BASE64_MARKER) {
        let bytes = BASE64_STANDARD.decode(rest.trim())?;
        Ok((String::from_utf8(bytes)?, ValueEncoding::Base64))
    } else {
        Ok((raw.to_string(), ValueEncoding::Plain))
    }
}

/// Parses one non-blank, non-comment logical line.
///
/// # Returns
///
/// - `Ok(None)` when the line has no colon; such lines are silently ignored
/// - `Ok(Some(line))` on success
/// - `Err(failure)` when a base64 value is malformed or not UTF-8
///
/// # Example
///
/// ```
/// use ldif_to_csv::ldif::attribute::{parse_attribute_line, ValueEncoding};
///
/// let line = parse_attribute_line("cn;lang-en:: Sm9obg==").unwrap().unwrap();
/// assert_eq!(line.name, "cn");
/// assert_eq!(line.value, "John");
/// assert_eq!(line.encoding, ValueEncoding::Base64);
/// ```
pub fn parse_attribute_line(line: &str) -> Result<Option<AttributeLine>, AttributeFailure> {
    let Some((name_part, value_part)) = line.split_once(':') else {
        return Ok(None);
    };

    let name = strip_options(name_part.trim()).to_string();

    match decode_value(value_part.trim()) {
        Ok((value, encoding)) => Ok(Some(AttributeLine {
            name,
            value: escape_quotes(&value),
            encoding,
        })),
        Err(error) => Err(AttributeFailure { name, error }),
    }
}
