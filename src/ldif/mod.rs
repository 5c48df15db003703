//! LDIF reading.
//!
//! [`parse_ldif`] runs the whole pipeline over an in-memory document:
//! unfolding, attribute parsing, record assembly and cataloguing of attribute
//! names. Malformed lines without a colon are dropped silently; undecodable
//! values are handled according to [`DecodeErrorPolicy`].

pub mod attribute;
pub mod catalog;
pub mod record;
pub mod unfold;

use tracing::{debug, warn};

use crate::error::LdifCsvError;

pub use attribute::{parse_attribute_line, AttributeLine, ValueEncoding};
pub use catalog::AttributeCatalog;
pub use record::{EmptyRecordPolicy, Record};
pub use unfold::{unfold, LineKind, LogicalLine};

use record::{AssemblerState, Emitted, RecordEvent};

/// What to do with an attribute line whose value cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeErrorPolicy {
    /// Drop the line, log a warning and keep going.
    #[default]
    Skip,
    /// Stop parsing and return [`LdifCsvError::Decode`].
    Abort,
}

/// Parser settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub decode_errors: DecodeErrorPolicy,
    pub empty_records: EmptyRecordPolicy,
}

/// Counters collected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Physical lines in the input.
    pub physical_lines: usize,
    /// Logical lines after unfolding (version header excluded).
    pub logical_lines: usize,
    /// Continuation lines merged into a preceding line.
    pub folded_lines: usize,
    /// Whether a `version` header at line 1 was skipped.
    pub version_header: bool,
    pub comments: usize,
    /// Content lines without a colon.
    pub ignored_lines: usize,
    /// Attribute lines dropped because their value could not be decoded.
    pub skipped_attributes: usize,
    /// Empty records closed and dropped under [`EmptyRecordPolicy::Suppress`].
    pub empty_records_dropped: usize,
}

/// Everything [`parse_ldif`] produces.
#[derive(Debug, Clone, Default)]
pub struct ParsedLdif {
    /// Records in file order.
    pub records: Vec<Record>,
    /// Attribute names in first-seen order.
    pub catalog: AttributeCatalog,
    pub stats: ParseStats,
}

/// Parses an LDIF document held in memory.
///
/// # Errors
///
/// Returns [`LdifCsvError::Decode`] for the first undecodable value when the
/// policy is [`DecodeErrorPolicy::Abort`]. Nothing else fails.
///
/// # Example
///
/// ```
/// use ldif_to_csv::ldif::{parse_ldif, ParseOptions};
///
/// let parsed = parse_ldif("dn: cn=A\ncn: A\n\ndn: cn=B\n", &ParseOptions::default()).unwrap();
/// assert_eq!(parsed.records.len(), 2);
/// assert_eq!(parsed.catalog.names(), &["dn", "cn"]);
/// ```
pub fn parse_ldif(text: &str, options: &ParseOptions) -> Result<ParsedLdif, LdifCsvError> {
    let unfolded = unfold(text);
    let mut parsed = ParsedLdif {
        stats: ParseStats {
            physical_lines: unfolded.physical_lines,
            logical_lines: unfolded.lines.len(),
            folded_lines: unfolded
                .lines
                .iter()
                .map(|line| line.physical_lines - 1)
                .sum(),
            version_header: unfolded.version_skipped,
            ..ParseStats::default()
        },
        ..ParsedLdif::default()
    };
    let mut state = AssemblerState::default();

    for line in unfolded.lines {
        let event = match line.kind() {
            LineKind::Blank => RecordEvent::Boundary,
            LineKind::Comment => {
                parsed.stats.comments += 1;
                continue;
            }
            LineKind::Content => match parse_attribute_line(&line.text) {
                Ok(Some(attribute)) => {
                    parsed.catalog.insert(&attribute.name);
                    RecordEvent::Attribute(attribute)
                }
                Ok(None) => {
                    debug!(line = line.number, "ignoring line without a colon");
                    parsed.stats.ignored_lines += 1;
                    continue;
                }
                Err(failure) => match options.decode_errors {
                    DecodeErrorPolicy::Skip => {
                        warn!(
                            line = line.number,
                            attribute = %failure.name,
                            error = %failure.error,
                            "skipping undecodable attribute value"
                        );
                        parsed.stats.skipped_attributes += 1;
                        continue;
                    }
                    DecodeErrorPolicy::Abort => {
                        return Err(LdifCsvError::Decode {
                            line: line.number,
                            attribute: failure.name,
                            source: failure.error,
                        });
                    }
                },
            },
        };

        let (next, emitted) = record::step(state, event, options.empty_records);
        state = next;
        match emitted {
            Emitted::Nothing => {}
            Emitted::Record(record) => {
                debug!(
                    line = line.number,
                    attributes = record.len(),
                    "record complete"
                );
                parsed.records.push(record);
            }
            Emitted::DroppedEmpty => parsed.stats.empty_records_dropped += 1,
        }
    }

    if let Some(record) = record::finish(state) {
        debug!(attributes = record.len(), "final record complete");
        parsed.records.push(record);
    }

    Ok(parsed)
}
