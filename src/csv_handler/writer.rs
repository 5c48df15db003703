use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::debug;

use crate::error::LdifCsvError;
use crate::filter::AttributeFilter;
use crate::ldif::Record;

/// Field separator.
pub const FIELD_SEPARATOR: &str = ",";

/// Row separator. No separator follows the last row.
pub const ROW_SEPARATOR: &str = "\n";

/// Renders records as CSV text.
///
/// # CSV Format
///
/// - First row: the column names joined with `,`, unquoted
/// - One row per record, in record order
/// - A cell is the record's stored value (already quoted and escaped) or
///   empty when the record lacks that attribute
/// - Every data row has exactly as many fields as there are columns
/// - Rows are joined with `\n`; there is no trailing newline
///
/// # Example
///
/// ```
/// use ldif_to_csv::csv_handler::render_csv;
/// use ldif_to_csv::filter::AttributeFilter;
/// use ldif_to_csv::ldif::Record;
///
/// let mut record = Record::new();
/// record.insert("cn", "A");
/// let filter = AttributeFilter::from_names(["cn", "mail"]);
///
/// assert_eq!(render_csv(&[record], &filter), "cn,mail\n\"A\",");
/// ```
#[must_use]
pub fn render_csv(records: &[Record], filter: &AttributeFilter) -> String {
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(filter.columns().join(FIELD_SEPARATOR));

    for record in records {
        let row: Vec<&str> = filter
            .columns()
            .iter()
            .map(|column| record.cell(column).unwrap_or(""))
            .collect();
        rows.push(row.join(FIELD_SEPARATOR));
    }

    rows.join(ROW_SEPARATOR)
}

/// Writes rendered CSV to a destination path.
///
/// The text goes to a temporary file in the destination's directory which is
/// then renamed over the destination, so a failed run never leaves a partial
/// CSV behind. The replacement keeps the permissions of an existing
/// destination; a new file gets the usual `0o666` minus the umask.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders `records` with `filter` and replaces the destination file.
    ///
    /// Returns the number of bytes written.
    pub fn write(
        &self,
        records: &[Record],
        filter: &AttributeFilter,
    ) -> Result<usize, LdifCsvError> {
        let contents = render_csv(records, filter);
        self.write_text(&contents)?;
        Ok(contents.len())
    }

    fn write_text(&self, contents: &str) -> Result<(), LdifCsvError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let existing = fs::metadata(&self.path)
            .ok()
            .map(|metadata| metadata.permissions());

        let mut builder = Builder::new();
        if let Some(permissions) = existing.clone().or_else(default_permissions) {
            builder.permissions(permissions);
        }
        let mut temp = builder
            .tempfile_in(directory)
            .map_err(|e| self.write_error(e))?;

        // Creation mode is masked by the umask; restore the exact old mode.
        if let Some(permissions) = existing {
            temp.as_file()
                .set_permissions(permissions)
                .map_err(|e| self.write_error(e))?;
        }

        temp.write_all(contents.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| self.write_error(e))?;
        temp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        debug!(path = %self.path.display(), bytes = contents.len(), "CSV written");
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> LdifCsvError {
        LdifCsvError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Mode for a newly created CSV, before the umask applies.
#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
