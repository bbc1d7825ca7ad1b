#![cfg(feature = "extract")]

use std::fs;
use std::path::Path;

use voucherbook::xml::{is_xml_char, parse_document, parse_sanitized, sanitize};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(path).unwrap()
}

#[test]
fn raw_export_needs_sanitizing() {
    let raw = fixture("daybook_success.xml");
    assert!(parse_document(&raw).is_err());
    assert!(parse_sanitized(&raw).is_ok());
}

#[test]
fn sanitized_export_holds_only_xml_chars() {
    let clean = sanitize(&fixture("daybook_success.xml"));
    assert!(clean.chars().all(is_xml_char));
    assert!(!clean.contains("&#4;"));
    assert!(clean.contains("Khanna &amp; Sons"));
}

#[test]
fn already_clean_export_is_untouched() {
    let raw = fixture("ledgers_opening.xml");
    assert_eq!(sanitize(&raw), raw);
}

#[test]
fn entities_decode_after_sanitizing() {
    let root = parse_sanitized("<A NAME=\"R&D\">Tom &amp; Jerry &#233; &unknown;</A>").unwrap();
    assert_eq!(root.attr("NAME"), Some("R&D"));
    assert_eq!(root.text, "Tom & Jerry é &unknown;");
}
