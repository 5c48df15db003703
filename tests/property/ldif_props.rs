//! Property-based tests for LDIF parsing and CSV rendering
//!
//! Covers row and field counts (with and without an explicit column list),
//! base64 round trips (plain and folded), idempotence, merging of repeated
//! attributes, folding, quote escaping and column ordering.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use csv::ReaderBuilder;
use proptest::prelude::*;

use ldif_to_csv::converter::Converter;
use ldif_to_csv::ldif::attribute::escape_quotes;
use ldif_to_csv::ldif::{parse_ldif, ParseOptions};

const NAMES: &[&str] = &[
    "dn",
    "cn",
    "sn",
    "mail",
    "uid",
    "title",
    "ou",
    "objectClass",
];

/// Strategy for attribute names drawn from a small pool so records overlap
fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(str::to_string)
}

/// Strategy for plain values: no surrounding whitespace and no leading `:`/`<`
/// marker, but with commas, quotes and semicolons inside
fn plain_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9@.=]{1,20}".prop_map(|s| s),
        "[a-zA-Z0-9]{1,5}[ ,;\"=]{1,3}[a-zA-Z0-9]{1,5}".prop_map(|s| s),
        "\"[a-zA-Z ]{0,10}\"".prop_map(|s| s),
    ]
}

/// Strategy for one record: at least one attribute line
fn record_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((name_strategy(), plain_value_strategy()), 1..6)
}

/// Strategy for a whole document
fn document_strategy() -> impl Strategy<Value = Vec<Vec<(String, String)>>> {
    prop::collection::vec(record_strategy(), 1..8)
}

/// Render records as LDIF text with a version header
fn to_ldif(records: &[Vec<(String, String)>]) -> String {
    let mut text = String::from("version: 1\n");
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        for (name, value) in record {
            text.push_str(&format!("{}: {}\n", name, value));
        }
    }
    text
}

/// Names in order of first appearance, computed independently of the parser
fn first_seen(records: &[Vec<(String, String)>]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in records.iter().flatten() {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// One data row per record, and every row has exactly one field per column
    #[test]
    fn prop_rows_match_records_and_columns(records in document_strategy()) {
        let csv_text = Converter::default().convert_str(&to_ldif(&records)).unwrap();
        let columns = first_seen(&records);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        prop_assert_eq!(rows.len(), records.len() + 1);
        for row in &rows {
            prop_assert_eq!(row.len(), columns.len());
        }
    }

    /// With an explicit column list, every row has one field per listed name,
    /// including names that no record carries
    #[test]
    fn prop_rows_match_explicit_columns(
        records in document_strategy(),
        listed in prop::sample::subsequence(NAMES, 1..4),
    ) {
        let mut columns: Vec<String> = listed.iter().map(|name| name.to_string()).collect();
        columns.push("employeeNumber".to_string());
        let converter = Converter::new(ParseOptions::default(), columns.clone());
        let csv_text = converter.convert_str(&to_ldif(&records)).unwrap();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_text.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        prop_assert_eq!(rows.len(), records.len() + 1);
        let header: Vec<&str> = rows[0].iter().collect();
        prop_assert_eq!(header, columns.iter().map(String::as_str).collect::<Vec<_>>());
        for row in &rows[1..] {
            prop_assert_eq!(row.len(), columns.len());
            prop_assert_eq!(row.get(columns.len() - 1), Some(""));
        }
    }

    /// Default column order is the order of first appearance across the file
    #[test]
    fn prop_default_columns_first_seen(records in document_strategy()) {
        let csv_text = Converter::default().convert_str(&to_ldif(&records)).unwrap();
        let header = csv_text.lines().next().unwrap();

        prop_assert_eq!(header, first_seen(&records).join(","));
    }

    /// Values survive a base64 round trip, modulo quote escaping
    #[test]
    fn prop_base64_round_trip(value in "\\PC{0,40}") {
        let text = format!("cn:: {}\n", BASE64_STANDARD.encode(&value));
        let parsed = parse_ldif(&text, &ParseOptions::default()).unwrap();

        let expected = format!("\"{}\"", escape_quotes(&value));
        prop_assert_eq!(parsed.records[0].cell("cn"), Some(expected.as_str()));
    }

    /// A base64 value folded at any point decodes to the original
    #[test]
    fn prop_folded_base64_round_trip(
        value in "\\PC{1,40}",
        split in any::<prop::sample::Index>(),
    ) {
        let encoded = BASE64_STANDARD.encode(&value);
        let at = 1 + split.index(encoded.len() - 1);
        let text = format!("cn:: {}\n {}\n", &encoded[..at], &encoded[at..]);
        let parsed = parse_ldif(&text, &ParseOptions::default()).unwrap();

        let expected = format!("\"{}\"", escape_quotes(&value));
        prop_assert_eq!(parsed.records[0].cell("cn"), Some(expected.as_str()));
        prop_assert_eq!(parsed.stats.folded_lines, 1);
    }

    /// Converting the same input twice gives identical output
    #[test]
    fn prop_conversion_is_idempotent(
        records in document_strategy(),
        filter in prop::collection::vec(name_strategy(), 0..4),
    ) {
        let converter = Converter::new(ParseOptions::default(), filter);
        let text = to_ldif(&records);

        prop_assert_eq!(
            converter.convert_str(&text).unwrap(),
            converter.convert_str(&text).unwrap()
        );
    }

    /// Repeated attributes in one record merge with `;` in encounter order
    #[test]
    fn prop_repeated_attributes_merge(
        values in prop::collection::vec("[a-zA-Z0-9]{1,10}", 1..5),
    ) {
        let text: String = values.iter().map(|v| format!("X: {}\n", v)).collect();
        let parsed = parse_ldif(&text, &ParseOptions::default()).unwrap();

        let expected = format!("\"{}\"", values.join(";"));
        prop_assert_eq!(parsed.records.len(), 1);
        prop_assert_eq!(parsed.records[0].cell("X"), Some(expected.as_str()));
    }

    /// A value folded at any point unfolds to the original, with no separator
    #[test]
    fn prop_folding_joins_without_separator(
        value in "[a-zA-Z0-9]{2,60}",
        split in any::<prop::sample::Index>(),
    ) {
        let at = 1 + split.index(value.len() - 1);
        let text = format!("name: {}\n {}\n", &value[..at], &value[at..]);
        let parsed = parse_ldif(&text, &ParseOptions::default()).unwrap();

        let expected = format!("\"{}\"", value);
        prop_assert_eq!(parsed.records[0].cell("name"), Some(expected.as_str()));
    }

    /// Every double quote in a value is doubled in its cell
    #[test]
    fn prop_quotes_are_doubled(value in "[a-z\"]{1,20}") {
        let parsed = parse_ldif(&format!("t: {}\n", value), &ParseOptions::default()).unwrap();
        let cell = parsed.records[0].cell("t").unwrap();

        let inner = &cell[1..cell.len() - 1];
        prop_assert_eq!(inner.matches('"').count(), 2 * value.matches('"').count());
        prop_assert_eq!(inner.replace("\"\"", "\""), value);
    }
}

#[test]
fn test_quoted_value_cell() {
    let csv_text = Converter::default()
        .convert_str("title: \"quoted\"\n")
        .unwrap();
    assert_eq!(csv_text, "title\n\"\"\"quoted\"\"\"");
}

#[test]
fn test_folded_base64_value() {
    let parsed = parse_ldif("cn:: SGVs\n bG8=\n", &ParseOptions::default()).unwrap();
    assert_eq!(parsed.records[0].cell("cn"), Some("\"Hello\""));
}
