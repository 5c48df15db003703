//! Records and the record assembler.
//!
//! A [`Record`] maps attribute names to CSV-ready cells: each cell is already
//! wrapped in double quotes with inner quotes doubled. Repeated attributes in
//! one record are merged into a single cell, joined with `;` in the order they
//! were encountered.
//!
//! Assembly is a small state machine. [`step`] is a pure transition from
//! `(state, event)` to `(state, emitted)`; blank lines close the current record
//! and attribute lines extend it. What happens to a record closed while still
//! empty is decided by [`EmptyRecordPolicy`].

use std::collections::HashMap;

use super::attribute::AttributeLine;

/// Separator used when the same attribute appears more than once in a record.
pub const MULTI_VALUE_SEPARATOR: char = ';';

/// One directory entry, ready to be laid out as a CSV row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an already-escaped value under `name`, merging with any earlier
    /// value for the same name.
    ///
    /// ```
    /// use ldif_to_csv::ldif::Record;
    ///
    /// let mut record = Record::new();
    /// record.insert("mail", "a@x.com");
    /// record.insert("mail", "b@x.com");
    /// assert_eq!(record.cell("mail"), Some("\"a@x.com;b@x.com\""));
    /// ```
    pub fn insert(&mut self, name: &str, escaped_value: &str) {
        match self.cells.get_mut(name) {
            Some(cell) => {
                let merged = format!(
                    "\"{}{}{}\"",
                    unquote(cell),
                    MULTI_VALUE_SEPARATOR,
                    escaped_value
                );
                *cell = merged;
            }
            None => {
                self.cells
                    .insert(name.to_string(), format!("\"{}\"", escaped_value));
            }
        }
    }

    /// The quoted cell for `name`, if the record has that attribute.
    pub fn cell(&self, name: &str) -> Option<&str> {
        self.cells.get(name).map(String::as_str)
    }

    /// Number of distinct attributes.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Strips the wrapping quotes from a stored cell.
fn unquote(cell: &str) -> &str {
    cell.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(cell)
}

/// What to do when a blank line closes a record with no attributes.
///
/// Two consecutive blank lines, or a blank line right after the version
/// header, close an empty record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyRecordPolicy {
    /// Drop empty records.
    #[default]
    Suppress,
    /// Emit them; each becomes a row of empty fields.
    Keep,
}

/// Input to the assembler, derived from one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEvent {
    /// A blank line.
    Boundary,
    /// A parsed attribute line.
    Attribute(AttributeLine),
}

/// Assembler state. There is always a record under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblerState {
    BuildingRecord(Record),
}

impl Default for AssemblerState {
    fn default() -> Self {
        AssemblerState::BuildingRecord(Record::new())
    }
}

/// Output of a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Nothing,
    Record(Record),
    /// An empty record was closed and dropped under [`EmptyRecordPolicy::Suppress`].
    DroppedEmpty,
}

/// Applies one event to the assembler state.
pub fn step(
    state: AssemblerState,
    event: RecordEvent,
    policy: EmptyRecordPolicy,
) -> (AssemblerState, Emitted) {
    let AssemblerState::BuildingRecord(mut record) = state;

    match event {
        RecordEvent::Boundary => {
            let emitted = if record.is_empty() && policy == EmptyRecordPolicy::Suppress {
                Emitted::DroppedEmpty
            } else {
                Emitted::Record(record)
            };
            (AssemblerState::default(), emitted)
        }
        RecordEvent::Attribute(line) => {
            record.insert(&line.name, &line.value);
            (AssemblerState::BuildingRecord(record), Emitted::Nothing)
        }
    }
}

/// Closes the assembler at end of input. A trailing empty record is never
/// emitted, regardless of policy.
pub fn finish(state: AssemblerState) -> Option<Record> {
    let AssemblerState::BuildingRecord(record) = state;
    (!record.is_empty()).then_some(record)
}
