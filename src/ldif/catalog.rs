//! Attribute catalog: every attribute name seen in a file, in first-seen order.

use std::collections::HashSet;

/// Ordered set of attribute names.
///
/// Insertion of an already-known name is a no-op, so the order of
/// [`AttributeCatalog::names`] is the order in which names first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeCatalog {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`. Returns `true` if it was not known before.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Names in first-seen order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
