//! CSV handler module
//!
//! Lays records out as CSV rows and writes them to the destination file.

pub mod writer;

pub use writer::{render_csv, CsvWriter};
