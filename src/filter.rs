//! Attribute filter module
//!
//! Decides which attributes become CSV columns, and in what order.
//!
//! # Column Sources
//!
//! - An explicit list from the `-a` CLI argument, kept in the order given
//! - Every attribute in the file, in order of first appearance, when no list
//!   is given
//!
//! # Example
//!
//! ```
//! use ldif_to_csv::filter::AttributeFilter;
//! use ldif_to_csv::ldif::AttributeCatalog;
//!
//! let mut catalog = AttributeCatalog::new();
//! catalog.insert("dn");
//! catalog.insert("cn");
//!
//! let filter = AttributeFilter::resolve(&[], &catalog);
//! assert_eq!(filter.columns(), &["dn", "cn"]);
//!
//! let filter = AttributeFilter::resolve(&["mail".to_string()], &catalog);
//! assert_eq!(filter.columns(), &["mail"]);
//! ```

use crate::ldif::AttributeCatalog;

/// An ordered list of attribute names used as CSV columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    columns: Vec<String>,
}

impl AttributeFilter {
    /// Create a filter from user-supplied names.
    ///
    /// Names are trimmed and blank entries dropped, so `"cn, mail,,"` yields
    /// `cn` and `mail`. Order and duplicates are kept as given.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Create a filter exporting every catalogued attribute.
    pub fn from_catalog(catalog: &AttributeCatalog) -> Self {
        Self {
            columns: catalog.names().to_vec(),
        }
    }

    /// Use `explicit` if it names at least one attribute, otherwise fall back
    /// to the catalog.
    pub fn resolve(explicit: &[String], catalog: &AttributeCatalog) -> Self {
        let filter = Self::from_names(explicit);
        if filter.is_empty() {
            Self::from_catalog(catalog)
        } else {
            filter
        }
    }

    /// Column names in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
