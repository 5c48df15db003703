//! Integration tests for the converter and the `ldif-to-csv` binary
