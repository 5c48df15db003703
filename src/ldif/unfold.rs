//! Line unfolding.
//!
//! Turns raw LDIF text into logical lines. A physical line that starts with a
//! space continues the previous logical line: it is trimmed and appended with
//! no separator. Unfolding runs as a separate pass so the record assembler only
//! ever sees complete lines.

/// Prefix of the optional header line at the very start of an LDIF file.
pub const VERSION_PREFIX: &str = "version";

/// Prefix that marks a comment line.
pub const COMMENT_PREFIX: char = '#';

/// Classification of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty after trimming; closes the current record.
    Blank,
    /// Starts with `#`; ignored.
    Comment,
    /// Anything else; handed to the attribute parser.
    Content,
}

/// A line after folding has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line number where this logical line starts.
    pub number: usize,
    /// Trimmed text with all continuations appended.
    pub text: String,
    /// Number of physical lines merged into this one (at least 1).
    pub physical_lines: usize,
}

impl LogicalLine {
    pub fn kind(&self) -> LineKind {
        if self.text.is_empty() {
            LineKind::Blank
        } else if self.text.starts_with(COMMENT_PREFIX) {
            LineKind::Comment
        } else {
            LineKind::Content
        }
    }
}

/// Result of unfolding a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unfolded {
    pub lines: Vec<LogicalLine>,
    /// Total physical lines read, including a skipped version header.
    pub physical_lines: usize,
    /// Whether a `version` header at line 1 was dropped.
    pub version_skipped: bool,
}

/// Unfolds `text` into logical lines.
///
/// Rules, applied with an explicit cursor over the physical lines:
/// - every physical line is trimmed before any decision is made about it;
/// - the first physical line is dropped when it starts with `version`; this
///   only happens at position 0 and never after folding;
/// - while the current line is non-empty and the next *raw* line starts with a
///   space, that line is trimmed and appended to the current one.
///
/// Both `\n` and `\r\n` line endings are accepted.
///
/// # Example
///
/// ```
/// use ldif_to_csv::ldif::unfold::unfold;
///
/// let unfolded = unfold("version: 1\ncn: Jo\n hn\n");
/// assert!(unfolded.version_skipped);
/// assert_eq!(unfolded.lines.len(), 1);
/// assert_eq!(unfolded.lines[0].text, "cn: John");
/// ```
#[must_use]
pub fn unfold(text: &str) -> Unfolded {
    let raw: Vec<&str> = text.lines().collect();
    let mut lines = Vec::new();
    let mut version_skipped = false;
    let mut cursor = 0;

    while cursor < raw.len() {
        let start = cursor;
        let mut logical = raw[cursor].trim().to_string();
        cursor += 1;

        if start == 0 && logical.starts_with(VERSION_PREFIX) {
            version_skipped = true;
            continue;
        }

        // A blank line never absorbs continuations.
        if !logical.is_empty() {
            while cursor < raw.len() && raw[cursor].starts_with(' ') {
                logical.push_str(raw[cursor].trim());
                cursor += 1;
            }
        }

        lines.push(LogicalLine {
            number: start + 1,
            text: logical,
            physical_lines: cursor - start,
        });
    }

    Unfolded {
        lines,
        physical_lines: raw.len(),
        version_skipped,
    }
}
