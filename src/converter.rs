//! LDIF to CSV conversion
//!
//! Ties the pieces together for one invocation: read the whole source file,
//! parse it, resolve the column list, render and write the CSV. The CSV is only
//! written after parsing has fully succeeded.
//!
//! # Example
//!
//! ```no_run
//! use ldif_to_csv::converter::Converter;
//! use ldif_to_csv::ldif::ParseOptions;
//! use std::path::Path;
//!
//! let converter = Converter::new(ParseOptions::default(), vec!["cn".to_string()]);
//! let stats = converter
//!     .convert(Path::new("people.ldif"), Path::new("people.csv"))
//!     .unwrap();
//!
//! println!("Exported {} records", stats.records);
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::csv_handler::{render_csv, CsvWriter};
use crate::error::LdifCsvError;
use crate::filter::AttributeFilter;
use crate::ldif::{parse_ldif, ParseOptions, ParseStats};

/// Statistics for a completed conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Data rows written.
    pub records: usize,
    /// Columns in the header row.
    pub columns: usize,
    /// Bytes written to the destination.
    pub bytes_written: usize,
    pub output: PathBuf,
    pub parse: ParseStats,
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LDIF Conversion Report")?;
        writeln!(f, "======================")?;
        writeln!(f, "Output: {}", self.output.display())?;
        writeln!(
            f,
            "Version header: {}",
            if self.parse.version_header { "skipped" } else { "none" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Records:           {:>10}", self.records)?;
        writeln!(f, "  Columns:           {:>10}", self.columns)?;
        writeln!(f, "  Input lines:       {:>10}", self.parse.physical_lines)?;
        writeln!(f, "  Folded lines:      {:>10}", self.parse.folded_lines)?;
        writeln!(f, "  Comments:          {:>10}", self.parse.comments)?;
        writeln!(f, "  Ignored lines:     {:>10}", self.parse.ignored_lines)?;
        writeln!(f, "  Skipped values:    {:>10}", self.parse.skipped_attributes)?;
        writeln!(f, "  Empty records:     {:>10}", self.parse.empty_records_dropped)?;
        write!(f, "  Bytes written:     {:>10}", self.bytes_written)
    }
}

/// Converts LDIF documents to CSV with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ParseOptions,
    attributes: Vec<String>,
}

impl Converter {
    /// `attributes` is the explicit column list; pass an empty list to export
    /// every attribute in first-seen order.
    pub fn new(options: ParseOptions, attributes: Vec<String>) -> Self {
        Self {
            options,
            attributes,
        }
    }

    /// Converts an in-memory LDIF document to CSV text.
    ///
    /// ```
    /// use ldif_to_csv::converter::Converter;
    ///
    /// let csv = Converter::default().convert_str("cn: A\nmail: a@x.com\n").unwrap();
    /// assert_eq!(csv, "cn,mail\n\"A\",\"a@x.com\"");
    /// ```
    pub fn convert_str(&self, text: &str) -> Result<String, LdifCsvError> {
        let parsed = parse_ldif(text, &self.options)?;
        let filter = AttributeFilter::resolve(&self.attributes, &parsed.catalog);
        Ok(render_csv(&parsed.records, &filter))
    }

    /// Converts `source` and atomically replaces `destination` with the result.
    ///
    /// # Errors
    ///
    /// - [`LdifCsvError::SourceNotFound`] if `source` does not exist
    /// - [`LdifCsvError::Io`] if it cannot be read as UTF-8 text
    /// - [`LdifCsvError::Decode`] under the abort policy
    /// - [`LdifCsvError::Write`] if the destination cannot be written
    ///
    /// On error the destination is left untouched.
    pub fn convert(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<ConversionStats, LdifCsvError> {
        if !source.exists() {
            return Err(LdifCsvError::SourceNotFound(source.to_path_buf()));
        }

        let text = fs::read_to_string(source)?;
        let parsed = parse_ldif(&text, &self.options)?;
        let filter = AttributeFilter::resolve(&self.attributes, &parsed.catalog);

        let writer = CsvWriter::new(destination);
        let bytes_written = writer.write(&parsed.records, &filter)?;

        info!(
            source = %source.display(),
            destination = %destination.display(),
            records = parsed.records.len(),
            columns = filter.len(),
            "conversion complete"
        );

        Ok(ConversionStats {
            records: parsed.records.len(),
            columns: filter.len(),
            bytes_written,
            output: writer.path().to_path_buf(),
            parse: parsed.stats,
        })
    }
}
