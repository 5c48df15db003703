//! Property-based tests

mod ldif_props;
