//! LDIF to CSV Library
//!
//! This library provides the core functionality for the `ldif-to-csv` CLI tool.
//! It includes modules for CLI argument parsing, LDIF parsing, attribute
//! filtering, CSV rendering and the conversion driver.

pub mod cli;
pub mod converter;
pub mod csv_handler;
pub mod error;
pub mod filter;
pub mod ldif;
